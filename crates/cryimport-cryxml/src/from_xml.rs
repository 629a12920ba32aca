//! Parse textual XML into an element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Element, Error, Result};

/// Parse XML text into an [`Element`] tree.
///
/// Declarations, comments and processing instructions are skipped. Character
/// data is trimmed; the first non-empty run inside an element becomes its text.
///
/// # Example
///
/// ```
/// use cryimport_cryxml::parse_xml;
///
/// let root = parse_xml(br#"<Material Name="steel"><Texture Map="Diffuse"/></Material>"#)?;
/// assert_eq!(root.tag(), "Material");
/// assert_eq!(root.children()[0].get("Map"), Some("Diffuse"));
/// # Ok::<(), cryimport_cryxml::Error>(())
/// ```
pub fn parse_xml(xml: &[u8]) -> Result<Element> {
    let xml = std::str::from_utf8(xml)?;
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(start_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(element) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    if element.text().is_none() && !text.trim().is_empty() {
                        element.set_text(text.into_owned());
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(element) = stack.last_mut() {
                    if element.text().is_none() {
                        element.set_text(String::from_utf8_lossy(&e).into_owned());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Xml(format!(
                    "XML parse error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml(format!("unclosed element <{}>", open.tag())));
    }

    root.ok_or_else(|| Error::Xml("no root element found in XML".to_string()))
}

/// Create an element from a start (or empty) tag, with its attributes.
fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        element.set(key, value);
    }

    Ok(element)
}

/// Attach a finished element to the open parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None if root.is_some() => {
            return Err(Error::Xml(format!(
                "second top-level element <{}>",
                element.tag()
            )))
        }
        None => *root = Some(element),
    }
    Ok(())
}
