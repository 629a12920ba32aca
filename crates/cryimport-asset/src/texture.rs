//! Texture references and path resolution.

use std::fmt;
use std::path::{Path, PathBuf};

/// Image format the exported textures were converted to.
///
/// Material files reference the original texture names; the importer reads
/// a converted copy next to them with a different extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextureFormat {
    #[default]
    Dds,
    Tif,
}

impl TextureFormat {
    /// File extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            TextureFormat::Dds => "dds",
            TextureFormat::Tif => "tif",
        }
    }
}

/// Role of a texture within a material (its `Map` attribute).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextureMap {
    Diffuse,
    Specular,
    Bumpmap,
    Custom(String),
}

impl TextureMap {
    /// Classify a `Map` attribute value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Diffuse" => TextureMap::Diffuse,
            "Specular" => TextureMap::Specular,
            "Bumpmap" => TextureMap::Bumpmap,
            other => TextureMap::Custom(other.to_string()),
        }
    }

    /// The `Map` attribute value.
    pub fn as_str(&self) -> &str {
        match self {
            TextureMap::Diffuse => "Diffuse",
            TextureMap::Specular => "Specular",
            TextureMap::Bumpmap => "Bumpmap",
            TextureMap::Custom(name) => name,
        }
    }
}

impl fmt::Display for TextureMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A texture slot of a material.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Texture {
    pub map: TextureMap,
    /// File as written in the material, relative to the game data root.
    pub file: String,
}

impl Texture {
    /// Path of the converted texture under `base`.
    pub fn path(&self, base: &Path, format: TextureFormat) -> PathBuf {
        resolve_texture_path(base, &self.file, format)
    }
}

/// Resolve a texture reference to its converted file under `base`.
///
/// Backslashes are treated as separators and the extension is replaced
/// with the one of `format`.
///
/// ```
/// use std::path::Path;
/// use cryimport_asset::{resolve_texture_path, TextureFormat};
///
/// let path = resolve_texture_path(
///     Path::new("/data"),
///     "objects\\mechs\\atlas\\atlas_body_diff.tif",
///     TextureFormat::Dds,
/// );
/// assert_eq!(path, Path::new("/data/objects/mechs/atlas/atlas_body_diff.dds"));
/// ```
pub fn resolve_texture_path(base: &Path, file: &str, format: TextureFormat) -> PathBuf {
    data_path(base, file, format.extension())
}

/// Join a game data reference onto `base`, swapping its extension.
pub(crate) fn data_path(base: &Path, file: &str, extension: &str) -> PathBuf {
    let normalized = file.replace('\\', "/");
    let mut relative = PathBuf::from(normalized.trim_start_matches('/'));
    relative.set_extension(extension);
    base.join(relative)
}
