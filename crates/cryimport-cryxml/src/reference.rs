//! CryXmlB reference (attribute) record.

use zerocopy::byteorder::little_endian::I32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// A row of the reference table: one attribute of some node.
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct CryXmlReference {
    /// Offset into the string table for the attribute name.
    pub name_offset: I32,
    /// Offset into the string table for the attribute value.
    pub value_offset: I32,
}

impl CryXmlReference {
    /// Size of one record in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}
