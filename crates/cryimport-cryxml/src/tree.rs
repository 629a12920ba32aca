//! Tree builder: flat node table to owned element tree.

use log::{trace, warn};

use crate::strings::StringTable;
use crate::{CryXmlNode, CryXmlReference, Element, Error, Result, RootPolicy, BUGGED_VALUE};

/// Build the element tree in a single pass over the node table.
///
/// Attributes are taken from the reference table with one running cursor,
/// `attribute_count` records per node in node order. The stored
/// `first_attribute_index` is not consulted.
///
/// A node is attached to its parent only if the parent id names a node
/// already seen (a smaller id). Any other node becomes the root.
pub(crate) fn build(
    nodes: &[CryXmlNode],
    references: &[CryXmlReference],
    strings: &StringTable<'_>,
    policy: RootPolicy,
) -> Result<Element> {
    let mut elements: Vec<Option<Element>> = Vec::with_capacity(nodes.len());
    let mut children: Vec<Vec<usize>> = Vec::with_capacity(nodes.len());
    let mut root: Option<usize> = None;
    let mut cursor = 0usize;

    for (id, node) in nodes.iter().enumerate() {
        let name_offset = node.name_offset.get();
        let tag = strings
            .get(name_offset)
            .ok_or(Error::UnresolvedName { node_id: id, offset: name_offset })?;

        let mut element = Element::new(tag);

        let attribute_count = node.attribute_count.get().max(0) as usize;
        for _ in 0..attribute_count {
            let reference = references
                .get(cursor)
                .ok_or(Error::AttributeIndexOutOfBounds {
                    node_id: id,
                    index: cursor,
                    count: references.len(),
                })?;
            cursor += 1;

            let key_offset = reference.name_offset.get();
            let key = strings
                .get(key_offset)
                .ok_or(Error::UnresolvedName { node_id: id, offset: key_offset })?;

            let value_offset = reference.value_offset.get();
            let value = strings.get(value_offset).unwrap_or_else(|| {
                warn!("node {id} <{tag}>: value offset {value_offset} of {key:?} does not resolve");
                BUGGED_VALUE
            });

            element.set(key, value);
        }

        trace!("node {id} <{tag}>: {attribute_count} attributes");
        elements.push(Some(element));
        children.push(Vec::new());

        let parent_id = node.parent_id.get();
        match usize::try_from(parent_id).ok().filter(|&parent| parent < id) {
            Some(parent) => children[parent].push(id),
            None => {
                if let Some(previous) = root {
                    match policy {
                        RootPolicy::Reject => {
                            return Err(Error::MultipleRoots { first: previous, second: id });
                        }
                        RootPolicy::LastWins => {
                            warn!("node {id} <{tag}> replaces node {previous} as document root");
                        }
                    }
                }
                root = Some(id);
            }
        }
    }

    let root = root.ok_or(Error::MissingRoot)?;

    // Children always have larger ids than their parent, so walking the ids
    // backwards finishes every subtree before its parent collects it.
    for id in (0..elements.len()).rev() {
        if children[id].is_empty() {
            continue;
        }
        let kids: Vec<Element> = children[id]
            .iter()
            .filter_map(|&child| elements[child].take())
            .collect();
        if let Some(element) = elements[id].as_mut() {
            element.set_children(kids);
        }
    }

    elements[root].take().ok_or(Error::MissingRoot)
}
