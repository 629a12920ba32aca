//! Prefab libraries (`.xml` under `prefabs/`).
//!
//! A prefab is a flat list of `Object` elements; geometry objects reference
//! an asset by its game path, lights carry their settings in `Properties`.

use std::path::{Path, PathBuf};

use cryimport_common::{ColorRgba, Quat, Vec3};
use cryimport_cryxml::Element;
use log::debug;

use crate::attr::{optional_parsed, required, required_parsed};
use crate::Result;

/// Layer that marks an `Entity` object as a light.
pub const LIGHTING_LAYER: &str = "Lighting";

/// A geometry object placed in a prefab.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedGeometry {
    pub name: String,
    /// Game path of the geometry (`Prefab` for brushes, `Geometry` for entities).
    pub source: String,
    pub position: Vec3,
    pub rotation: Quat,
}

impl PlacedGeometry {
    fn from_element(element: &Element, source_attribute: &'static str) -> Result<Self> {
        Ok(Self {
            name: required(element, "Name")?.to_string(),
            source: required(element, source_attribute)?.replace('\\', "/"),
            position: required_parsed(element, "Pos")?,
            rotation: required_parsed(element, "Rotate")?,
        })
    }

    /// Asset library holding the geometry: the directory of the source,
    /// containing a `.blend` named after that directory.
    ///
    /// `objects/props/crate/crate_a.cgf` -> `<base>/objects/props/crate/crate.blend`
    pub fn library_path(&self, base: &Path) -> PathBuf {
        let source = Path::new(self.source.trim_start_matches('/'));
        let dir = source.parent().unwrap_or_else(|| Path::new(""));
        let dir_name = dir.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        base.join(dir).join(format!("{dir_name}.blend"))
    }

    /// Name of the object group inside the library: the source file stem.
    pub fn item_group(&self) -> &str {
        Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// A point light placed in a prefab.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    /// `Properties/Color@clrDiffuse`
    pub color: Option<ColorRgba>,
    /// `Properties/Options@bCastShadow`, `None` when there are no options.
    pub casts_shadow: Option<bool>,
}

impl Light {
    fn from_element(element: &Element) -> Result<Self> {
        let properties = element.find("Properties");
        let options = properties.and_then(|p| p.find("Options"));
        let color = properties.and_then(|p| p.find("Color"));

        Ok(Self {
            name: required(element, "Name")?.to_string(),
            position: required_parsed(element, "Pos")?,
            rotation: required_parsed(element, "Rotate")?,
            color: color.and_then(|c| optional_parsed(c, "clrDiffuse")),
            casts_shadow: options.map(|o| o.get("bCastShadow") != Some("0")),
        })
    }
}

/// An `Object` element of a prefab, by its `Type`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrefabObject {
    Brush(PlacedGeometry),
    GeomEntity(PlacedGeometry),
    Light(Light),
    /// Any other object, including entities outside the lighting layer.
    Other { kind: String, name: Option<String> },
}

impl PrefabObject {
    /// Interpret an `Object` element.
    pub fn from_element(element: &Element) -> Result<Self> {
        let kind = required(element, "Type")?;
        Ok(match kind {
            "Brush" => PrefabObject::Brush(PlacedGeometry::from_element(element, "Prefab")?),
            "GeomEntity" => {
                PrefabObject::GeomEntity(PlacedGeometry::from_element(element, "Geometry")?)
            }
            "Entity" if element.get("Layer") == Some(LIGHTING_LAYER) => {
                PrefabObject::Light(Light::from_element(element)?)
            }
            _ => PrefabObject::Other {
                kind: kind.to_string(),
                name: element.get("Name").map(str::to_string),
            },
        })
    }

    /// The placed geometry, for brushes and geometry entities.
    pub fn geometry(&self) -> Option<&PlacedGeometry> {
        match self {
            PrefabObject::Brush(g) | PrefabObject::GeomEntity(g) => Some(g),
            _ => None,
        }
    }
}

/// Every `Object` element under `root`, in document order.
pub fn prefab_objects(root: &Element) -> Result<Vec<PrefabObject>> {
    let objects = root
        .iter("Object")
        .map(PrefabObject::from_element)
        .collect::<Result<Vec<_>>>()?;
    debug!("{} prefab objects", objects.len());
    Ok(objects)
}
