//! Cryimport - CryEngine asset decoding library.
//!
//! This crate provides a unified interface to the cryimport crates.
//!
//! # Crates
//!
//! - [`cryimport_common`] - Binary reading and attribute value types
//! - [`cryimport_cryxml`] - CryXmlB binary XML decoding and encoding
//! - [`cryimport_asset`] - Materials, character attachments and prefabs
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cryimport::prelude::*;
//!
//! let cdf_path = Path::new("/games/mwo/Objects/mechs/atlas/atlas.cdf");
//! let layout = MechLayout::from_cdf(cdf_path).ok_or("not under a data root")?;
//!
//! let library = MaterialLibrary::load(layout.body_material())?;
//! for material in library.iter() {
//!     for texture in &material.textures {
//!         let path = texture.path(&layout.base_dir, TextureFormat::Dds);
//!         println!("{} -> {}", material.name, path.display());
//!     }
//! }
//!
//! let cdf = read_file_root(cdf_path)?;
//! for attachment in skip_cockpit(attachments(&cdf)?) {
//!     let geometry = attachment.geometry_path(&layout.base_dir);
//!     println!("{} on {}: {}", attachment.name, attachment.bone_name, geometry.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use cryimport_asset as asset;
pub use cryimport_common as common;
pub use cryimport_cryxml as cryxml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use cryimport_asset::{
        attachments, base_dir, prefab_objects, skip_cockpit, sub_materials, Attachment,
        Material, MaterialLibrary, MechLayout, PrefabObject, ShaderKind, TextureFormat,
    };
    pub use cryimport_common::{BinaryReader, ColorRgba, Quat, Vec3};
    pub use cryimport_cryxml::{
        decode, decode_root, read_file, read_file_root, CryXml, CryXmlWriter, DecodeOptions,
        Decoded, Element, RootPolicy,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_binary_material_through_facade() {
        let root = Element::new("Material").with_attr("Name", "glass").with_attr("Shader", "Glass");
        let bytes = CryXmlWriter::new(&root).build().unwrap();

        let decoded = decode_root(&bytes).unwrap();
        let library = MaterialLibrary::from_element(&decoded, "fallback");
        assert_eq!(library.get("glass").unwrap().shader, ShaderKind::Glass);
    }

    #[test]
    fn test_layout_paths_through_facade() {
        let layout = MechLayout::from_cdf(std::path::Path::new("data/Objects/mechs/hbk/hbk.cdf")).unwrap();
        assert_eq!(layout.base_dir, std::path::Path::new("data"));
        assert_eq!(base_dir(&layout.armature()).as_deref(), Some(layout.base_dir.as_path()));
    }

    #[test]
    fn test_version() {
        assert_eq!(super::VERSION, "0.1.0");
    }
}
