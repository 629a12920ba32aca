//! Attribute value types.
//!
//! CryEngine XML stores vectors, rotations and colors as comma-separated
//! float lists inside attribute values, e.g. `Pos="1,2.5,-3"`. These types
//! parse them.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Split a comma-separated float list and require exactly `N` components.
fn parse_components<const N: usize>(kind: &'static str, s: &str) -> Result<[f32; N]> {
    let invalid = |reason: String| Error::InvalidValue {
        kind,
        value: s.to_string(),
        reason,
    };

    let mut out = [0.0f32; N];
    let mut count = 0;
    for part in s.split(',') {
        if count == N {
            return Err(invalid(format!("expected {N} components, found more")));
        }
        out[count] = part
            .trim()
            .parse::<f32>()
            .map_err(|e| invalid(format!("component {count}: {e}")))?;
        count += 1;
    }

    if count != N {
        return Err(invalid(format!("expected {N} components, found {count}")));
    }
    Ok(out)
}

/// A 3D position or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl FromStr for Vec3 {
    type Err = Error;

    /// Parse `"x,y,z"`.
    fn from_str(s: &str) -> Result<Self> {
        let [x, y, z] = parse_components::<3>("vector", s)?;
        Ok(Self { x, y, z })
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// A rotation quaternion.
///
/// CryEngine writes the scalar part first: `"w,x,y,z"`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new quaternion.
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FromStr for Quat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [w, x, y, z] = parse_components::<4>("quaternion", s)?;
        Ok(Self { w, x, y, z })
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.w, self.x, self.y, self.z)
    }
}

/// RGBA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Mean of the RGB channels.
    pub fn average(&self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }
}

impl FromStr for ColorRgba {
    type Err = Error;

    /// Parse `"r,g,b"`. Material colors carry no alpha, so it is always 1.0.
    fn from_str(s: &str) -> Result<Self> {
        let [r, g, b] = parse_components::<3>("color", s)?;
        Ok(Self { r, g, b, a: 1.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        let v: Vec3 = "1, 2.5,-3".parse().unwrap();
        assert_eq!(v, Vec3::new(1.0, 2.5, -3.0));
        assert_eq!(v.to_string(), "1,2.5,-3");
    }

    #[test]
    fn test_parse_quat_scalar_first() {
        let q: Quat = "0.7071,0,0,0.7071".parse().unwrap();
        assert_eq!(q.w, 0.7071);
        assert_eq!(q.z, 0.7071);
        assert_eq!(Quat::default(), Quat::IDENTITY);
    }

    #[test]
    fn test_parse_color_sets_opaque_alpha() {
        let c: ColorRgba = "0.5,0.25,0".parse().unwrap();
        assert_eq!(c, ColorRgba::new(0.5, 0.25, 0.0, 1.0));
        assert!((c.average() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wrong_component_count() {
        assert!(matches!(
            "1,2".parse::<Vec3>(),
            Err(Error::InvalidValue { kind: "vector", .. })
        ));
        assert!("1,2,3,4".parse::<Vec3>().is_err());
        assert!("1,2,3".parse::<Quat>().is_err());
    }

    #[test]
    fn test_bugged_sentinel_is_rejected() {
        let err = "BUGGED".parse::<ColorRgba>().unwrap_err();
        assert!(err.to_string().contains("BUGGED"));
    }
}
