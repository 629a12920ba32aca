//! Typed views over decoded CryEngine asset files.
//!
//! The decoder yields a generic [`Element`](cryimport_cryxml::Element) tree;
//! this crate reads the parts of it an importer needs:
//!
//! - [`MaterialLibrary`] for `.mtl` material files
//! - [`attachments`] for `.cdf` character definitions
//! - [`prefab_objects`] for prefab libraries
//! - [`base_dir`] and [`MechLayout`] to locate the data root and mech files
//!
//! # Example
//!
//! ```
//! use cryimport_asset::{MaterialLibrary, ShaderKind};
//! use cryimport_cryxml::decode_root;
//!
//! let root = decode_root(br#"<Material Name="steel" Shader="Mech" Shininess="64"/>"#)?;
//! let library = MaterialLibrary::from_element(&root, "steel");
//!
//! let steel = library.get("steel").unwrap();
//! assert_eq!(steel.shader, ShaderKind::Mech);
//! assert!(steel.roughness() > 0.4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod attachment;
mod attr;
mod error;
mod layout;
mod material;
mod prefab;
mod texture;

pub use attachment::{
    attachments, skip_cockpit, Attachment, MaterialRole, COCKPIT, WEAPON_KEYWORDS,
};
pub use error::{Error, Result};
pub use layout::{base_dir, MechLayout, DATA_ROOT_CHILDREN};
pub use material::{sub_materials, Material, MaterialLibrary, ShaderKind};
pub use prefab::{prefab_objects, Light, PlacedGeometry, PrefabObject, LIGHTING_LAYER};
pub use texture::{resolve_texture_path, Texture, TextureFormat, TextureMap};
