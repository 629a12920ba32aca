//! Material definitions (`.mtl`).
//!
//! A material file holds one or more `Material` elements, optionally nested
//! under `SubMaterials`. Only elements that carry a `Shader` attribute are
//! actual materials; the others are containers.

use std::fmt;
use std::path::Path;

use cryimport_common::ColorRgba;
use cryimport_cryxml::{read_file_root, Element};
use log::{debug, warn};

use crate::attr::optional_parsed;
use crate::texture::{Texture, TextureMap};
use crate::Result;

/// Shader a material is built with, from its `Shader` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShaderKind {
    Nodraw,
    MechCockpit,
    Mech,
    Illum,
    Glass,
    /// A shader this crate has no dedicated handling for.
    Unknown(String),
}

impl ShaderKind {
    /// Classify a `Shader` attribute value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Nodraw" => ShaderKind::Nodraw,
            "MechCockpit" => ShaderKind::MechCockpit,
            "Mech" => ShaderKind::Mech,
            "Illum" => ShaderKind::Illum,
            "Glass" => ShaderKind::Glass,
            other => ShaderKind::Unknown(other.to_string()),
        }
    }

    /// The `Shader` attribute value.
    pub fn as_str(&self) -> &str {
        match self {
            ShaderKind::Nodraw => "Nodraw",
            ShaderKind::MechCockpit => "MechCockpit",
            ShaderKind::Mech => "Mech",
            ShaderKind::Illum => "Illum",
            ShaderKind::Glass => "Glass",
            ShaderKind::Unknown(name) => name,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single material.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub name: String,
    pub shader: ShaderKind,
    /// `Diffuse` color.
    pub diffuse: Option<ColorRgba>,
    /// `Specular` color.
    pub specular: Option<ColorRgba>,
    /// `IndirectColor`, used as emission.
    pub emissive: Option<ColorRgba>,
    /// `Opacity`, 0 = transparent, 1 = opaque.
    pub opacity: Option<f32>,
    /// `Shininess`, 0..=255.
    pub shininess: Option<f32>,
    /// Flags of `StringGenMask` (`%METAL%GLOSS_MAP` -> `["METAL", "GLOSS_MAP"]`),
    /// `None` when the attribute is absent.
    pub gen_mask: Option<Vec<String>>,
    pub textures: Vec<Texture>,
}

impl Material {
    /// Roughness used when the material has no `Shininess`.
    pub const DEFAULT_ROUGHNESS: f32 = 0.5;

    /// Interpret a `Material` element.
    ///
    /// Returns `None` if the element has no `Shader` attribute. Unnamed
    /// materials are called `fallback_name`.
    pub fn from_element(element: &Element, fallback_name: &str) -> Option<Self> {
        let shader = ShaderKind::from_name(element.get("Shader")?);
        let name = element.get("Name").unwrap_or(fallback_name).to_string();

        let gen_mask = element.get("StringGenMask").map(|mask| {
            mask.split('%')
                .filter(|flag| !flag.is_empty())
                .map(str::to_string)
                .collect()
        });

        Some(Self {
            name,
            shader,
            diffuse: optional_parsed(element, "Diffuse"),
            specular: optional_parsed(element, "Specular"),
            emissive: optional_parsed(element, "IndirectColor"),
            opacity: optional_parsed(element, "Opacity"),
            shininess: optional_parsed(element, "Shininess"),
            gen_mask,
            textures: collect_textures(element),
        })
    }

    /// Whether `StringGenMask` contains a flag.
    pub fn has_gen_flag(&self, flag: &str) -> bool {
        self.gen_mask.iter().flatten().any(|f| f == flag)
    }

    /// First texture bound to a map.
    pub fn texture(&self, map: &TextureMap) -> Option<&Texture> {
        self.textures.iter().find(|t| &t.map == map)
    }

    /// PBR roughness derived from `Shininess`: `1 - sqrt(shininess / 255)`.
    pub fn roughness(&self) -> f32 {
        match self.shininess {
            Some(shininess) => 1.0 - (shininess / 255.0).clamp(0.0, 1.0).sqrt(),
            None => Self::DEFAULT_ROUGHNESS,
        }
    }

    /// PBR metallic factor: fully metallic unless a gen mask exists without `METAL`.
    ///
    /// An empty `StringGenMask=""` still counts as a mask.
    pub fn metallic(&self) -> f32 {
        if self.gen_mask.is_none() || self.has_gen_flag("METAL") {
            1.0
        } else {
            0.7
        }
    }
}

/// Every `Texture` element below a material, nested materials included.
fn collect_textures(material: &Element) -> Vec<Texture> {
    material
        .iter("Texture")
        .filter_map(|element| match (element.get("Map"), element.get("File")) {
            (Some(map), Some(file)) => Some(Texture {
                map: TextureMap::from_name(map),
                file: file.to_string(),
            }),
            _ => {
                warn!("skipping <Texture> without Map and File");
                None
            }
        })
        .collect()
}

/// The `SubMaterials` children of a material root, or the root itself if it
/// has none.
pub fn sub_materials(root: &Element) -> Vec<&Element> {
    let subs: Vec<&Element> = root.find_all("SubMaterials").collect();
    if subs.is_empty() {
        vec![root]
    } else {
        subs
    }
}

/// All materials of a material file, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    /// Collect every `Material` element (the root included) that has a `Shader`.
    pub fn from_element(root: &Element, fallback_name: &str) -> Self {
        let materials: Vec<Material> = root
            .iter("Material")
            .filter_map(|element| Material::from_element(element, fallback_name))
            .collect();
        debug!("{} materials", materials.len());
        Self { materials }
    }

    /// Decode a material file and collect its materials.
    ///
    /// Unnamed materials are named after the file stem.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let root = read_file_root(path)?;
        let fallback = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("material");
        Ok(Self::from_element(&root, fallback))
    }

    /// Look up a material by name. Later definitions shadow earlier ones.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.iter().rev().find(|m| m.name == name)
    }

    /// Iterate over the materials in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the file defined no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use cryimport_cryxml::{decode_root, BUGGED_VALUE};

    use super::*;

    const HULL_MTL: &[u8] = br#"<Material MtlFlags="524544">
  <SubMaterials>
    <Material Name="hull" Shader="Mech" Diffuse="0.5,0.5,0.5" Specular="0.2,0.4,0.6"
              Shininess="255" StringGenMask="%GLOSS_MAP%SPECULAR_MAP">
      <Textures>
        <Texture Map="Diffuse" File="objects/mechs/atlas/hull_diff.tif"/>
        <Texture Map="Bumpmap" File="objects/mechs/atlas/hull_ddna.tif"/>
      </Textures>
    </Material>
    <Material Name="window" Shader="Glass" Opacity="0.25" IndirectColor="1,1,0"/>
    <Material Name="proxy" Shader="Nodraw"/>
    <Material Name="decal" Shader="DecalFx"/>
  </SubMaterials>
</Material>"#;

    #[test]
    fn test_library_skips_containers() {
        let root = decode_root(HULL_MTL).unwrap();
        let library = MaterialLibrary::from_element(&root, "atlas_body");

        let names: Vec<_> = library.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["hull", "window", "proxy", "decal"]);
        assert_eq!(library.get("decal").unwrap().shader, ShaderKind::Unknown("DecalFx".into()));
        assert_eq!(library.get("proxy").unwrap().shader, ShaderKind::Nodraw);
    }

    #[test]
    fn test_material_properties() {
        let root = decode_root(HULL_MTL).unwrap();
        let library = MaterialLibrary::from_element(&root, "atlas_body");
        let hull = library.get("hull").unwrap();

        assert_eq!(hull.shader, ShaderKind::Mech);
        assert_eq!(hull.diffuse, Some(ColorRgba::new(0.5, 0.5, 0.5, 1.0)));
        assert_eq!(
            hull.gen_mask.as_deref(),
            Some(&["GLOSS_MAP".to_string(), "SPECULAR_MAP".to_string()][..])
        );
        assert_eq!(hull.roughness(), 0.0);
        assert_eq!(hull.metallic(), 0.7);
        assert_eq!(hull.textures.len(), 2);
        assert_eq!(
            hull.texture(&TextureMap::Bumpmap).unwrap().file,
            "objects/mechs/atlas/hull_ddna.tif"
        );

        let window = library.get("window").unwrap();
        assert_eq!(window.opacity, Some(0.25));
        assert_eq!(window.emissive.unwrap().average(), 2.0 / 3.0);
        assert_eq!(window.roughness(), Material::DEFAULT_ROUGHNESS);
        assert_eq!(window.metallic(), 1.0);
    }

    #[test]
    fn test_unnamed_material_uses_fallback() {
        let root = Element::new("Material").with_attr("Shader", "Illum");
        let library = MaterialLibrary::from_element(&root, "crate_01");
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("crate_01").unwrap().shader, ShaderKind::Illum);
    }

    #[test]
    fn test_bugged_attribute_is_ignored() {
        let root = Element::new("Material")
            .with_attr("Shader", "Mech")
            .with_attr("Opacity", BUGGED_VALUE)
            .with_attr("Diffuse", BUGGED_VALUE);
        let material = Material::from_element(&root, "m").unwrap();
        assert_eq!(material.opacity, None);
        assert_eq!(material.diffuse, None);
    }

    #[test]
    fn test_empty_gen_mask_is_not_metal() {
        let masked = Element::new("Material")
            .with_attr("Shader", "Mech")
            .with_attr("StringGenMask", "");
        let material = Material::from_element(&masked, "m").unwrap();
        assert_eq!(material.gen_mask, Some(Vec::new()));
        assert_eq!(material.metallic(), 0.7);

        let metal = masked.clone().with_attr("StringGenMask", "%METAL%");
        assert_eq!(Material::from_element(&metal, "m").unwrap().metallic(), 1.0);
    }

    #[test]
    fn test_textures_include_nested_materials() {
        let root = Element::new("Material")
            .with_attr("Shader", "Mech")
            .with_child(Element::new("Textures").with_child(
                Element::new("Texture").with_attr("Map", "Diffuse").with_attr("File", "outer"),
            ))
            .with_child(Element::new("SubMaterials").with_child(
                Element::new("Material").with_child(
                    Element::new("Texture").with_attr("Map", "Diffuse").with_attr("File", "inner"),
                ),
            ));

        let material = Material::from_element(&root, "m").unwrap();
        let files: Vec<_> = material.textures.iter().map(|t| t.file.as_str()).collect();
        assert_eq!(files, vec!["outer", "inner"]);
    }

    #[test]
    fn test_sub_materials() {
        let root = decode_root(HULL_MTL).unwrap();
        let subs = sub_materials(&root);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].tag(), "SubMaterials");

        let single = Element::new("Material");
        assert_eq!(sub_materials(&single), vec![&single]);
    }

    #[test]
    fn test_load_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas_body.mtl");

        let root = Element::new("Material").with_attr("Shader", "Mech");
        let bytes = cryimport_cryxml::CryXmlWriter::new(&root).build().unwrap();
        std::fs::write(&path, bytes).unwrap();

        let library = MaterialLibrary::load(&path).unwrap();
        assert_eq!(library.get("atlas_body").unwrap().shader, ShaderKind::Mech);
    }
}
