//! CryXmlB header structure.

use zerocopy::byteorder::little_endian::I32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// CryXmlB table descriptor block.
///
/// This structure follows the NUL-terminated magic string at the start of the
/// file. Every offset is absolute from the start of the file.
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct CryXmlHeader {
    /// Total valid byte length of the file, magic included.
    pub file_length: I32,
    /// Position of the node table.
    pub node_table_offset: I32,
    /// Number of node records.
    pub node_count: I32,
    /// Position of the reference (attribute) table.
    pub reference_table_offset: I32,
    /// Number of reference records.
    pub reference_count: I32,
    /// Position of the order (child index) table.
    pub order_table_offset: I32,
    /// Number of order records.
    pub order_count: I32,
    /// Position of the string data.
    pub content_offset: I32,
    /// Size of the string data in bytes.
    pub content_length: I32,
}

impl CryXmlHeader {
    /// The magic string written at the start of a CryXmlB file, terminator included.
    pub const MAGIC: &'static [u8; 8] = b"CryXmlB\0";

    /// The byte that selects the binary decode path.
    pub const MAGIC_START: u8 = b'C';

    /// Size of the descriptor block in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

/// Convert a header field to a position or count, rejecting negative values.
pub(crate) fn to_usize(field: &'static str, value: I32) -> Result<usize> {
    let value = value.get();
    usize::try_from(value).map_err(|_| Error::NegativeField { field, value })
}

const _: () = assert!(CryXmlHeader::SIZE == 36);
