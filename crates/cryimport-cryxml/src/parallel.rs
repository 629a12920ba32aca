//! Parallel decoding of independent files.

use std::path::Path;

use rayon::prelude::*;

use crate::{DecodeOptions, Decoded, Result};

/// Decode many files on the rayon thread pool.
///
/// Every file is decoded independently with its own tables; results are
/// returned in the order of `paths`.
pub fn read_files_parallel<P>(paths: &[P], options: &DecodeOptions) -> Vec<Result<Decoded>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| options.read_file(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CryXmlWriter, Element, Error};

    #[test]
    fn test_read_files_parallel_keeps_order() {
        let dir = tempfile::tempdir().unwrap();

        let binary = Element::new("Material").with_attr("Shader", "Mech");
        let binary_path = dir.path().join("hull.mtl");
        std::fs::write(&binary_path, CryXmlWriter::new(&binary).build().unwrap()).unwrap();

        let text_path = dir.path().join("prefab.xml");
        std::fs::write(&text_path, b"<Prefab/>").unwrap();

        let missing_path = dir.path().join("missing.cdf");

        let results = read_files_parallel(
            &[&binary_path, &text_path, &missing_path],
            &DecodeOptions::default(),
        );

        assert_eq!(results.len(), 3);
        assert!(matches!(&results[0], Ok(Decoded::Binary(root)) if *root == binary));
        assert!(matches!(&results[1], Ok(Decoded::Text(root)) if root.tag() == "Prefab"));
        assert!(matches!(&results[2], Err(Error::Io(_))));
    }
}
