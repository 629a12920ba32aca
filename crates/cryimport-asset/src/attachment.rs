//! Character definition attachments (`.cdf`).

use std::path::{Path, PathBuf};

use cryimport_common::{Quat, Vec3};
use cryimport_cryxml::Element;
use log::debug;

use crate::attr::{required, required_parsed};
use crate::texture::data_path;
use crate::Result;

/// Attachment name fragments that mark a weapon or variant part.
pub const WEAPON_KEYWORDS: &[&str] = &[
    "hero", "missile", "missle", "narc", "uac", "uac2", "uac5", "uac10", "uac20", "rac", "_lty",
    "ac2", "ac5", "ac10", "ac20", "gauss", "ppc", "flamer", "_mg", "_lbx", "damaged", "_mount",
    "_rl20", "_rl10", "_rl15", "laser", "ams", "_phoenix", "blank", "invasion", "hmg", "lmg",
    "lams", "hand", "barrel",
];

/// Attachment name of the cockpit interior, which is imported separately.
pub const COCKPIT: &str = "cockpit";

/// Which material of the parent asset an attachment is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialRole {
    /// `<asset>_body`
    Body,
    /// `<asset>_variant`, for weapons and other swappable parts.
    Variant,
    /// `<asset>_window`, for the cockpit glass.
    Window,
}

impl MaterialRole {
    /// Suffix appended to the asset name to form the material name.
    pub const fn suffix(self) -> &'static str {
        match self {
            MaterialRole::Body => "body",
            MaterialRole::Variant => "variant",
            MaterialRole::Window => "window",
        }
    }

    /// Material name for an asset, e.g. `atlas_body`.
    pub fn material_name(self, asset: &str) -> String {
        format!("{asset}_{}", self.suffix())
    }
}

/// A geometry file attached to a skeleton bone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// `AName`
    pub name: String,
    /// `BoneName`, with spaces replaced by underscores to match exported armatures.
    pub bone_name: String,
    /// `Binding`, the geometry file as written.
    pub binding: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub flags: Option<String>,
}

impl Attachment {
    /// Interpret an `Attachment` element.
    pub fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            name: required(element, "AName")?.to_string(),
            bone_name: required(element, "BoneName")?.replace(' ', "_"),
            binding: required(element, "Binding")?.to_string(),
            position: required_parsed(element, "Position")?,
            rotation: required_parsed(element, "Rotation")?,
            flags: element.get("Flags").map(str::to_string),
        })
    }

    /// Path of the exported `.dae` for the binding, under `base`.
    pub fn geometry_path(&self, base: &Path) -> PathBuf {
        data_path(base, &self.binding, "dae")
    }

    /// Whether this is the cockpit attachment.
    pub fn is_cockpit(&self) -> bool {
        self.name == COCKPIT
    }

    /// Material role derived from the attachment name.
    pub fn material_role(&self) -> MaterialRole {
        let name = self.name.as_str();
        if name.contains("head_cockpit") {
            MaterialRole::Window
        } else if name.contains("_damaged") || name.contains("_prop") {
            MaterialRole::Body
        } else if WEAPON_KEYWORDS.iter().any(|k| name.contains(k)) {
            MaterialRole::Variant
        } else {
            MaterialRole::Body
        }
    }
}

/// Every `Attachment` element under `root`, in document order.
pub fn attachments(root: &Element) -> Result<Vec<Attachment>> {
    let attachments = root
        .iter("Attachment")
        .map(Attachment::from_element)
        .collect::<Result<Vec<_>>>()?;
    debug!("{} attachments", attachments.len());
    Ok(attachments)
}

/// Drop the cockpit attachment.
pub fn skip_cockpit(attachments: Vec<Attachment>) -> impl Iterator<Item = Attachment> {
    attachments.into_iter().filter(|a| !a.is_cockpit())
}

#[cfg(test)]
mod tests {
    use cryimport_cryxml::decode_root;

    use super::*;
    use crate::Error;

    const ATLAS_CDF: &[u8] = br#"<CharacterDefinition>
  <Model File="objects/mechs/atlas/body/atlas.chr"/>
  <AttachmentList>
    <Attachment Type="CA_BONE" AName="left_arm_uac20" Rotation="1,0,0,0" Position="1.5,0,2"
                BoneName="Bip01 L UpperArm" Binding="objects\mechs\atlas\body\atlas_a_left_arm_uac20.cga" Flags="0"/>
    <Attachment Type="CA_BONE" AName="centre_torso" Rotation="0.707107,0,0,0.707107" Position="0,0,3"
                BoneName="torso" Binding="objects/mechs/atlas/body/atlas_a_centre_torso.cga" Flags="0"/>
    <Attachment Type="CA_BONE" AName="cockpit" Rotation="1,0,0,0" Position="0,0.5,4"
                BoneName="head" Binding="objects/mechs/atlas/cockpit_standard/atlas_a_cockpit.cga"/>
  </AttachmentList>
</CharacterDefinition>"#;

    #[test]
    fn test_attachments() {
        let root = decode_root(ATLAS_CDF).unwrap();
        let list = attachments(&root).unwrap();
        assert_eq!(list.len(), 3);

        let arm = &list[0];
        assert_eq!(arm.name, "left_arm_uac20");
        assert_eq!(arm.bone_name, "Bip01_L_UpperArm");
        assert_eq!(arm.position, Vec3::new(1.5, 0.0, 2.0));
        assert_eq!(arm.rotation, Quat::IDENTITY);
        assert_eq!(arm.flags.as_deref(), Some("0"));
        assert_eq!(
            arm.geometry_path(Path::new("/data")),
            Path::new("/data/objects/mechs/atlas/body/atlas_a_left_arm_uac20.dae")
        );

        assert_eq!(list[1].rotation, Quat::new(0.707107, 0.0, 0.0, 0.707107));
        assert_eq!(list[2].flags, None);
    }

    #[test]
    fn test_skip_cockpit() {
        let root = decode_root(ATLAS_CDF).unwrap();
        let names: Vec<_> = skip_cockpit(attachments(&root).unwrap())
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["left_arm_uac20", "centre_torso"]);
    }

    fn named(name: &str) -> Attachment {
        Attachment {
            name: name.to_string(),
            bone_name: String::new(),
            binding: String::new(),
            position: Vec3::default(),
            rotation: Quat::IDENTITY,
            flags: None,
        }
    }

    #[test]
    fn test_material_role() {
        assert_eq!(named("left_arm_uac20").material_role(), MaterialRole::Variant);
        assert_eq!(named("right_torso_missile").material_role(), MaterialRole::Variant);
        assert_eq!(named("centre_torso").material_role(), MaterialRole::Body);
        assert_eq!(named("left_arm_damaged").material_role(), MaterialRole::Body);
        assert_eq!(named("antenna_prop").material_role(), MaterialRole::Body);
        assert_eq!(named("head_cockpit").material_role(), MaterialRole::Window);
        assert_eq!(MaterialRole::Variant.material_name("atlas"), "atlas_variant");
    }

    #[test]
    fn test_missing_and_bugged_attributes() {
        let missing = Element::new("Attachment").with_attr("AName", "torso");
        assert!(matches!(
            Attachment::from_element(&missing),
            Err(Error::MissingAttribute { attribute: "BoneName", .. })
        ));

        let bugged = Element::new("Attachment")
            .with_attr("AName", "torso")
            .with_attr("BoneName", "torso")
            .with_attr("Binding", "torso.cga")
            .with_attr("Position", "BUGGED")
            .with_attr("Rotation", "1,0,0,0");
        assert!(matches!(Attachment::from_element(&bugged), Err(Error::Value(_))));
    }
}
