//! CryXmlB table deserializer.

use cryimport_common::BinaryReader;
use log::{debug, warn};

use crate::header::to_usize;
use crate::strings::StringTable;
use crate::tree;
use crate::{
    CryXmlHeader, CryXmlNode, CryXmlReference, DecodeOptions, Element, Error, Result,
};

/// The flat tables of a CryXmlB file.
///
/// This holds everything read from the file before the tree is built.
/// Strings borrow from the input buffer.
#[derive(Debug)]
pub struct CryXml<'a> {
    magic: &'a str,
    header: CryXmlHeader,
    nodes: Vec<CryXmlNode>,
    references: Vec<CryXmlReference>,
    order: Vec<i32>,
    strings: StringTable<'a>,
}

impl<'a> CryXml<'a> {
    /// Check if data starts with the CryXmlB magic.
    pub fn is_cryxml(data: &[u8]) -> bool {
        data.starts_with(CryXmlHeader::MAGIC)
    }

    /// Read the header and all four tables.
    ///
    /// The magic string is read up to its terminator but not validated;
    /// callers decide whether the input is binary by its first byte.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let magic = reader.read_cstring().map_err(|e| match e {
            cryimport_common::Error::MissingNullTerminator { position } => {
                Error::TruncatedString { offset: position }
            }
            other => Error::Common(other),
        })?;
        if magic.as_bytes() != &CryXmlHeader::MAGIC[..CryXmlHeader::MAGIC.len() - 1] {
            warn!("unexpected binary XML magic {magic:?}, decoding anyway");
        }

        let header: CryXmlHeader = reader.read_struct()?;
        debug!(
            "{magic}: length={} nodes={}@{} references={}@{} order={}@{} content={}@{}",
            header.file_length.get(),
            header.node_count.get(),
            header.node_table_offset.get(),
            header.reference_count.get(),
            header.reference_table_offset.get(),
            header.order_count.get(),
            header.order_table_offset.get(),
            header.content_length.get(),
            header.content_offset.get(),
        );

        reader.seek(to_usize("node_table_offset", header.node_table_offset)?);
        let nodes = reader.read_array::<CryXmlNode>(to_usize("node_count", header.node_count)?)?;

        reader.seek(to_usize("reference_table_offset", header.reference_table_offset)?);
        let references = reader
            .read_array::<CryXmlReference>(to_usize("reference_count", header.reference_count)?)?;

        reader.seek(to_usize("order_table_offset", header.order_table_offset)?);
        let order_count = to_usize("order_count", header.order_count)?;
        reader.peek_bytes(order_count.saturating_mul(4))?;
        let mut order = Vec::with_capacity(order_count);
        for _ in 0..order_count {
            order.push(reader.read_i32()?);
        }

        let strings = StringTable::scan(
            data,
            to_usize("content_offset", header.content_offset)?,
            to_usize("file_length", header.file_length)?,
        )?;
        debug!("{} strings in content table", strings.len());

        Ok(Self {
            magic,
            header,
            nodes,
            references,
            order,
            strings,
        })
    }

    /// The magic string, without its terminator.
    pub fn magic(&self) -> &'a str {
        self.magic
    }

    /// The table descriptor block.
    pub fn header(&self) -> &CryXmlHeader {
        &self.header
    }

    /// Node records, in id order.
    pub fn nodes(&self) -> &[CryXmlNode] {
        &self.nodes
    }

    /// Reference (attribute) records, in table order.
    pub fn references(&self) -> &[CryXmlReference] {
        &self.references
    }

    /// Order table entries. Not needed to rebuild the tree.
    pub fn order(&self) -> &[i32] {
        &self.order
    }

    /// Get a string from the content table by offset.
    pub fn get_string(&self, offset: i32) -> Option<&'a str> {
        self.strings.get(offset)
    }

    /// Build the element tree.
    pub fn to_element(&self, options: &DecodeOptions) -> Result<Element> {
        tree::build(&self.nodes, &self.references, &self.strings, options.root_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cryxml() {
        assert!(CryXml::is_cryxml(b"CryXmlB\0extra data"));
        assert!(!CryXml::is_cryxml(b"NotCryXml"));
        assert!(!CryXml::is_cryxml(b"Cry"));
    }

    #[test]
    fn test_magic_without_terminator() {
        let result = CryXml::parse(b"CryXmlB");
        assert!(matches!(result, Err(Error::TruncatedString { offset: 0 })));
    }

    #[test]
    fn test_short_header() {
        let result = CryXml::parse(b"CryXmlB\0\x10\x00");
        assert!(matches!(
            result,
            Err(Error::Common(cryimport_common::Error::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn test_negative_table_offset() {
        let mut data = CryXmlHeader::MAGIC.to_vec();
        let fields: [i32; 9] = [44, -8, 1, 44, 0, 44, 0, 44, 0];
        for field in fields {
            data.extend_from_slice(&field.to_le_bytes());
        }

        let result = CryXml::parse(&data);
        assert!(matches!(
            result,
            Err(Error::NegativeField { field: "node_table_offset", value: -8 })
        ));
    }

    #[test]
    fn test_empty_tables() {
        let mut data = CryXmlHeader::MAGIC.to_vec();
        let fields: [i32; 9] = [44, 44, 0, 44, 0, 44, 0, 44, 0];
        for field in fields {
            data.extend_from_slice(&field.to_le_bytes());
        }

        let cryxml = CryXml::parse(&data).unwrap();
        assert_eq!(cryxml.magic(), "CryXmlB");
        assert!(cryxml.nodes().is_empty());
        assert!(matches!(
            cryxml.to_element(&DecodeOptions::default()),
            Err(Error::MissingRoot)
        ));
    }
}
