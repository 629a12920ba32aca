//! Common utilities for cryimport.
//!
//! This crate provides foundational types used across the cryimport crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`value`] - Vector, quaternion and color types parsed from the
//!   comma-separated attribute strings found in CryEngine XML

mod error;
mod reader;

pub mod value;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use value::{ColorRgba, Quat, Vec3};

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Re-export memchr for NUL-terminator scanning
pub use memchr;
