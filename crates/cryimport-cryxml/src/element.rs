//! Decoded element tree.
//!
//! [`Element`] is the output of every decode, whether the input was binary
//! or textual XML. Parents own their children; there are no back-pointers.

use std::collections::HashMap;
use std::fmt;
#[cfg(feature = "xml-output")]
use std::io::Write;

#[cfg(feature = "xml-output")]
use crate::{Error, Result};

/// Attribute count above which key lookups go through a hash index.
const INDEX_THRESHOLD: usize = 16;

/// Nesting shown by `Debug` before children are summarized.
const DEBUG_DEPTH: usize = 32;

/// Attributes of an element, in emission order.
///
/// Inserting a key that already exists replaces its value but keeps the
/// key's original position.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Attributes {
    entries: Vec<(String, String)>,
    /// Key -> position, built once the list grows past `INDEX_THRESHOLD`.
    #[cfg_attr(feature = "serde", serde(skip))]
    index: Option<HashMap<String, usize>>,
}

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        match &self.index {
            Some(index) => index.get(key).copied(),
            None => self.entries.iter().position(|(k, _)| k == key),
        }
    }

    /// Get the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    /// Check if an attribute is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Set an attribute, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some(i) = self.position(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }

        let position = self.entries.len();
        if self.index.is_none() && position >= INDEX_THRESHOLD {
            self.index = Some(
                self.entries
                    .iter()
                    .enumerate()
                    .map(|(i, (k, _))| (k.clone(), i))
                    .collect(),
            );
        }
        if let Some(index) = &mut self.index {
            index.insert(key.clone(), position);
        }
        self.entries.push((key, value));
        None
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Attributes {}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// An element of a decoded document.
///
/// # Example
///
/// ```
/// use cryimport_cryxml::Element;
///
/// let material = Element::new("Material")
///     .with_attr("Name", "steel")
///     .with_child(Element::new("Texture").with_attr("Map", "Diffuse"));
///
/// assert_eq!(material.get("Name"), Some("steel"));
/// assert_eq!(material.iter("Texture").count(), 1);
/// ```
///
/// Dropping, cloning, comparing and writing a tree walk it with an explicit
/// stack, so nesting depth is bounded by memory rather than the call stack.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    tag: String,
    attributes: Attributes,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes and no children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// All attributes, in emission order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// Check if an attribute is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Set an attribute, returning the previous value if the key existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(key, value)
    }

    /// Text content. Only documents decoded from textual XML carry text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// Direct children, in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub(crate) fn set_children(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    /// Copy of this element without its children.
    fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            text: self.text.clone(),
            children: Vec::with_capacity(self.children.len()),
        }
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// This element and all of its descendants, in document (pre-)order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// This element and all descendants with the given tag, in document order.
    pub fn iter<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.tag == tag)
    }

    /// Convert to an indented XML string with a declaration.
    #[cfg(feature = "xml-output")]
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write XML to a writer.
    #[cfg(feature = "xml-output")]
    pub fn write_xml<W: Write>(&self, writer: W) -> Result<()> {
        use quick_xml::events::{BytesDecl, Event};
        use quick_xml::Writer;

        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

        xml_writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| Error::Xml(e.to_string()))?;

        write_element(&mut xml_writer, self)
    }
}

/// Write an element and its subtree.
#[cfg(feature = "xml-output")]
fn write_element<W: Write>(writer: &mut quick_xml::Writer<W>, root: &Element) -> Result<()> {
    use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

    enum Step<'e> {
        Open(&'e Element),
        Close(&'e Element),
    }

    fn xml_error(e: impl fmt::Display) -> Error {
        Error::Xml(e.to_string())
    }

    let mut steps = vec![Step::Open(root)];

    while let Some(step) = steps.pop() {
        let element = match step {
            Step::Open(element) => element,
            Step::Close(element) => {
                writer
                    .write_event(Event::End(BytesEnd::new(element.tag())))
                    .map_err(xml_error)?;
                continue;
            }
        };

        let mut start = BytesStart::new(element.tag());
        for (key, value) in element.attributes().iter() {
            start.push_attribute((key, value));
        }

        if element.children.is_empty() && element.text.is_none() {
            writer.write_event(Event::Empty(start)).map_err(xml_error)?;
            continue;
        }

        writer.write_event(Event::Start(start)).map_err(xml_error)?;
        if let Some(text) = element.text() {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_error)?;
        }

        steps.push(Step::Close(element));
        steps.extend(element.children.iter().rev().map(Step::Open));
    }

    Ok(())
}

impl Clone for Element {
    fn clone(&self) -> Self {
        let mut root = self.shallow_clone();
        let mut root_children = self.children.iter();
        // Copies under construction, each with the iterator over its source children.
        let mut stack: Vec<(Element, std::slice::Iter<'_, Element>)> = Vec::new();

        loop {
            let next = match stack.last_mut() {
                Some((_, children)) => children.next(),
                None => root_children.next(),
            };
            match next {
                Some(child) => stack.push((child.shallow_clone(), child.children.iter())),
                None => match stack.pop() {
                    Some((finished, _)) => match stack.last_mut() {
                        Some((parent, _)) => parent.children.push(finished),
                        None => root.children.push(finished),
                    },
                    None => return root,
                },
            }
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((a, b)) = pairs.pop() {
            if a.tag != b.tag
                || a.attributes != b.attributes
                || a.text != b.text
                || a.children.len() != b.children.len()
            {
                return false;
            }
            pairs.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for Element {}

impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut element) = pending.pop() {
            pending.append(&mut element.children);
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = DebugElement {
            element: self,
            depth: 0,
        };
        fmt::Debug::fmt(&view, f)
    }
}

/// `Debug` view that summarizes children below `DEBUG_DEPTH`.
struct DebugElement<'e> {
    element: &'e Element,
    depth: usize,
}

impl fmt::Debug for DebugElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let element = self.element;
        let mut out = f.debug_struct("Element");
        out.field("tag", &element.tag)
            .field("attributes", &element.attributes)
            .field("text", &element.text);

        if self.depth >= DEBUG_DEPTH && !element.children.is_empty() {
            out.field(
                "children",
                &format_args!("[.. {} elements]", element.children.len()),
            );
        } else {
            let children: Vec<_> = element
                .children
                .iter()
                .map(|child| DebugElement {
                    element: child,
                    depth: self.depth + 1,
                })
                .collect();
            out.field("children", &children);
        }
        out.finish()
    }
}

/// Pre-order iterator over an element and its descendants.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}
