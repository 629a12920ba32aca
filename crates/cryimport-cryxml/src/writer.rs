//! Encoder for CryXmlB documents.
//!
//! Turns an [`Element`] tree back into the binary table layout, so decoded
//! documents can be re-packed and fixtures can be produced from XML text.

use std::collections::HashMap;

use zerocopy::byteorder::little_endian::{I16, I32};
use zerocopy::IntoBytes;

use crate::{CryXmlHeader, CryXmlNode, CryXmlReference, Element, Error, Result};

/// Encoder for CryXmlB documents.
///
/// # Example
///
/// ```
/// use cryimport_cryxml::{decode, CryXmlWriter, Element};
///
/// let root = Element::new("Material")
///     .with_attr("Name", "MyMaterial")
///     .with_child(Element::new("Texture")
///         .with_attr("Map", "Diffuse")
///         .with_attr("File", "texture.dds"));
///
/// let bytes = CryXmlWriter::new(&root).build()?;
/// assert_eq!(decode(&bytes)?.into_root(), Some(root));
/// # Ok::<(), cryimport_cryxml::Error>(())
/// ```
#[derive(Debug)]
pub struct CryXmlWriter<'e> {
    root: &'e Element,
}

/// Flattened tables, before layout.
#[derive(Debug, Default)]
struct Tables {
    nodes: Vec<CryXmlNode>,
    order: Vec<i32>,
    references: Vec<CryXmlReference>,
}

impl<'e> CryXmlWriter<'e> {
    /// Create a writer for the given root element.
    pub fn new(root: &'e Element) -> Self {
        Self { root }
    }

    /// Build the CryXmlB binary representation.
    ///
    /// Text content is not part of the binary format and is dropped.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut strings = StringTable::new();
        collect_strings(self.root, &mut strings);

        let mut tables = Tables::default();
        flatten(self.root, &mut tables, &strings)?;

        // Layout: Magic | Header | Nodes | Order | References | Strings
        let magic_size = CryXmlHeader::MAGIC.len();
        let node_table_offset = magic_size + CryXmlHeader::SIZE;
        let order_table_offset = node_table_offset + tables.nodes.len() * CryXmlNode::SIZE;
        let reference_table_offset = order_table_offset + tables.order.len() * 4;
        let content_offset = reference_table_offset + tables.references.len() * CryXmlReference::SIZE;
        let string_data = strings.into_bytes();
        let file_length = content_offset + string_data.len();

        let header = CryXmlHeader {
            file_length: to_i32("file bytes", file_length)?,
            node_table_offset: to_i32("file bytes", node_table_offset)?,
            node_count: to_i32("nodes", tables.nodes.len())?,
            reference_table_offset: to_i32("file bytes", reference_table_offset)?,
            reference_count: to_i32("attributes", tables.references.len())?,
            order_table_offset: to_i32("file bytes", order_table_offset)?,
            order_count: to_i32("children", tables.order.len())?,
            content_offset: to_i32("file bytes", content_offset)?,
            content_length: to_i32("string bytes", string_data.len())?,
        };

        let mut output = Vec::with_capacity(file_length);
        output.extend_from_slice(CryXmlHeader::MAGIC);
        output.extend_from_slice(header.as_bytes());
        output.extend_from_slice(tables.nodes.as_bytes());
        for index in &tables.order {
            output.extend_from_slice(&index.to_le_bytes());
        }
        output.extend_from_slice(tables.references.as_bytes());
        output.extend_from_slice(&string_data);

        Ok(output)
    }
}

fn to_i32(what: &'static str, count: usize) -> Result<I32> {
    i32::try_from(count)
        .map(I32::new)
        .map_err(|_| Error::TooManyItems { what, count })
}

fn to_i16(what: &'static str, count: usize) -> Result<I16> {
    i16::try_from(count)
        .map(I16::new)
        .map_err(|_| Error::TooManyItems { what, count })
}

/// Collect every tag, key and value in document order.
fn collect_strings(root: &Element, table: &mut StringTable) {
    for element in root.descendants() {
        table.add(element.tag());
        for (key, value) in element.attributes().iter() {
            table.add(key);
            table.add(value);
        }
    }
}

/// Flatten the tree in pre-order. The root gets parent id -1.
fn flatten(root: &Element, tables: &mut Tables, strings: &StringTable) -> Result<()> {
    // (element, parent id, order table slot that receives its id)
    let mut pending: Vec<(&Element, i32, Option<usize>)> = vec![(root, -1, None)];

    while let Some((element, parent_id, slot)) = pending.pop() {
        let node_id = to_i32("nodes", tables.nodes.len())?;
        if let Some(slot) = slot {
            tables.order[slot] = node_id.get();
        }

        let first_attribute_index = to_i32("attributes", tables.references.len())?;
        let first_child_index = to_i32("children", tables.order.len())?;

        for (key, value) in element.attributes().iter() {
            tables.references.push(CryXmlReference {
                name_offset: strings.offset(key)?,
                value_offset: strings.offset(value)?,
            });
        }

        tables.nodes.push(CryXmlNode {
            name_offset: strings.offset(element.tag())?,
            item_type: I32::new(0),
            attribute_count: to_i16("attributes on one node", element.attributes().len())?,
            child_count: to_i16("children of one node", element.children().len())?,
            parent_id: I32::new(parent_id),
            first_attribute_index,
            first_child_index,
            reserved: I32::new(0),
        });

        // Reserve the order slots, filled as the children get their ids.
        let order_start = tables.order.len();
        tables.order.resize(order_start + element.children().len(), 0);

        pending.extend(
            element
                .children()
                .iter()
                .enumerate()
                .rev()
                .map(|(i, child)| (child, node_id.get(), Some(order_start + i))),
        );
    }

    to_i32("nodes", tables.nodes.len())?;
    Ok(())
}

/// De-duplicated string table under construction.
#[derive(Debug, Default)]
struct StringTable {
    strings: Vec<String>,
    offsets: HashMap<String, i32>,
    current_offset: usize,
}

impl StringTable {
    fn new() -> Self {
        Self::default()
    }

    /// Add a string to the table if not already present.
    fn add(&mut self, s: &str) {
        if !self.offsets.contains_key(s) {
            // Offsets past i32::MAX are caught by the header's file length check.
            self.offsets.insert(s.to_string(), self.current_offset as i32);
            self.current_offset += s.len() + 1;
            self.strings.push(s.to_string());
        }
    }

    /// Get the offset of a string.
    fn offset(&self, s: &str) -> Result<I32> {
        self.offsets
            .get(s)
            .map(|&offset| I32::new(offset))
            .ok_or_else(|| Error::Xml(format!("string not found in table: {s}")))
    }

    /// Concatenate the strings, each followed by a NUL.
    fn into_bytes(self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.current_offset);
        for s in self.strings {
            bytes.extend_from_slice(s.as_bytes());
            bytes.push(0);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CryXml;

    #[test]
    fn test_writer_layout() {
        let root = Element::new("Root").with_attr("version", "1.0");
        let bytes = CryXmlWriter::new(&root).build().unwrap();

        assert!(CryXml::is_cryxml(&bytes));

        let parsed = CryXml::parse(&bytes).unwrap();
        let header = parsed.header();
        assert_eq!(header.file_length.get() as usize, bytes.len());
        assert_eq!(header.node_count.get(), 1);
        assert_eq!(header.reference_count.get(), 1);
        assert_eq!(header.order_count.get(), 0);
        assert_eq!(header.content_offset.get(), 8 + 36 + 28 + 8);

        let node = parsed.nodes()[0];
        assert_eq!(parsed.get_string(node.name_offset.get()), Some("Root"));
        assert_eq!(node.parent_id.get(), -1);
    }

    #[test]
    fn test_writer_order_table_lists_children() {
        let root = Element::new("Config")
            .with_child(Element::new("Setting").with_child(Element::new("Value")))
            .with_child(Element::new("Setting"));

        let bytes = CryXmlWriter::new(&root).build().unwrap();
        let parsed = CryXml::parse(&bytes).unwrap();

        // Pre-order ids: Config=0, Setting=1, Value=2, Setting=3
        assert_eq!(parsed.order(), &[1, 3, 2]);
        let parents: Vec<_> = parsed.nodes().iter().map(|n| n.parent_id.get()).collect();
        assert_eq!(parents, vec![-1, 0, 1, 0]);
        assert_eq!(parsed.nodes()[1].first_child_index.get(), 2);
    }

    #[test]
    fn test_writer_deduplicates_strings() {
        let root = Element::new("Setting")
            .with_attr("key", "Setting")
            .with_child(Element::new("Setting").with_attr("key", "Setting"));

        let bytes = CryXmlWriter::new(&root).build().unwrap();
        let parsed = CryXml::parse(&bytes).unwrap();
        assert_eq!(parsed.header().content_length.get(), "Setting\0key\0".len() as i32);
    }

    #[test]
    fn test_writer_deep_chain() {
        let mut root = Element::new("Leaf");
        for _ in 0..50_000 {
            root = Element::new("Node").with_child(root);
        }

        let bytes = CryXmlWriter::new(&root).build().unwrap();
        let parsed = CryXml::parse(&bytes).unwrap();
        assert_eq!(parsed.nodes().len(), 50_001);
        assert_eq!(parsed.nodes()[50_000].parent_id.get(), 49_999);
        assert_eq!(parsed.order()[49_999], 50_000);
        assert_eq!(parsed.to_element(&Default::default()).unwrap(), root);
    }

    #[test]
    fn test_writer_drops_text() {
        let root = Element::new("entry").with_text("EngineAssets/caustics.dds");
        let bytes = CryXmlWriter::new(&root).build().unwrap();

        let decoded = CryXml::parse(&bytes)
            .unwrap()
            .to_element(&Default::default())
            .unwrap();
        assert_eq!(decoded, Element::new("entry"));
    }
}
