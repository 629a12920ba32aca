//! CryXmlB node record.

use zerocopy::byteorder::little_endian::{I16, I32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// A row of the node table.
///
/// The node's id is its position in the table; it is not stored.
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct CryXmlNode {
    /// Offset into the string table for the tag name.
    pub name_offset: I32,
    /// Item type (not needed to rebuild the tree).
    pub item_type: I32,
    /// Number of attributes on this node.
    pub attribute_count: I16,
    /// Number of child nodes.
    pub child_count: I16,
    /// Id of the parent node (-1 for the root).
    pub parent_id: I32,
    /// Index of the first attribute in the reference table.
    pub first_attribute_index: I32,
    /// Index of the first child in the order table.
    pub first_child_index: I32,
    pub reserved: I32,
}

impl CryXmlNode {
    /// Size of one record in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

const _: () = assert!(CryXmlNode::SIZE == 28);
