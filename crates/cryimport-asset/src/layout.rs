//! Game data directory layout.
//!
//! Asset files reference each other by paths relative to the data root, the
//! directory that holds `Objects/` and `Prefabs/`. These helpers derive that
//! root and the conventional mech file locations from the path of an input
//! file. They work on the path text only and never touch the filesystem.

use std::path::{Path, PathBuf};

/// Directory names that sit directly below the data root, compared
/// case-insensitively.
pub const DATA_ROOT_CHILDREN: &[&str] = &["objects", "prefabs"];

/// The data root for a file or directory: the parent of its nearest
/// `Objects` or `Prefabs` ancestor (or of the path itself).
///
/// Returns `None` if no such ancestor exists.
///
/// ```
/// use std::path::Path;
/// use cryimport_asset::base_dir;
///
/// let cdf = Path::new("/games/mwo/Objects/mechs/atlas/atlas.cdf");
/// assert_eq!(base_dir(cdf).as_deref(), Some(Path::new("/games/mwo")));
/// assert_eq!(base_dir(Path::new("/tmp/atlas.cdf")), None);
/// ```
pub fn base_dir(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .find(|ancestor| {
            ancestor
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    DATA_ROOT_CHILDREN
                        .iter()
                        .any(|child| name.eq_ignore_ascii_case(child))
                })
        })
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}

/// File locations of a mech, derived from its character definition path
/// (`<base>/Objects/mechs/<mech>/<mech>.cdf`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MechLayout {
    /// Data root.
    pub base_dir: PathBuf,
    /// Directory of the `.cdf`.
    pub mech_dir: PathBuf,
    /// `<mech_dir>/body`
    pub body_dir: PathBuf,
    /// Mech name, the `.cdf` file stem.
    pub mech: String,
}

impl MechLayout {
    /// Derive the layout from a `.cdf` path.
    ///
    /// Returns `None` if the path has no data root or no file stem.
    pub fn from_cdf(cdf: &Path) -> Option<Self> {
        let base_dir = base_dir(cdf)?;
        let mech = cdf.file_stem()?.to_str()?.to_string();
        let mech_dir = cdf.parent()?.to_path_buf();
        let body_dir = mech_dir.join("body");
        Some(Self {
            base_dir,
            mech_dir,
            body_dir,
            mech,
        })
    }

    /// `<body_dir>/<mech>_body.mtl`
    pub fn body_material(&self) -> PathBuf {
        self.body_dir.join(format!("{}_body.mtl", self.mech))
    }

    /// `<mech_dir>/cockpit_standard/<mech>_a_cockpit_standard.mtl`
    pub fn cockpit_material(&self) -> PathBuf {
        self.mech_dir
            .join("cockpit_standard")
            .join(format!("{}_a_cockpit_standard.mtl", self.mech))
    }

    /// `<body_dir>/<mech>.dae`, the exported armature.
    pub fn armature(&self) -> PathBuf {
        self.body_dir.join(format!("{}.dae", self.mech))
    }
}
