//! Binary/text dispatch and top-level decode entry points.

use std::io::Read;
use std::path::Path;

use log::debug;

use crate::{parse_xml, CryXml, CryXmlHeader, DecodeOptions, Element, Error, Result};

/// Value substituted for an attribute whose value offset does not resolve.
///
/// Its presence marks damaged data; the rest of the document is intact.
pub const BUGGED_VALUE: &str = "BUGGED";

/// Outcome of a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The input held no bytes; there is nothing to parse.
    Empty,
    /// The input was textual XML.
    Text(Element),
    /// The input was a CryXmlB binary document.
    Binary(Element),
}

impl Decoded {
    /// Whether the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Decoded::Empty)
    }

    /// The root element, if any.
    pub fn root(&self) -> Option<&Element> {
        match self {
            Decoded::Empty => None,
            Decoded::Text(root) | Decoded::Binary(root) => Some(root),
        }
    }

    /// Take the root element, if any.
    pub fn into_root(self) -> Option<Element> {
        match self {
            Decoded::Empty => None,
            Decoded::Text(root) | Decoded::Binary(root) => Some(root),
        }
    }

    /// Take the root element, treating empty input as [`Error::EmptyInput`].
    pub fn require_root(self) -> Result<Element> {
        self.into_root().ok_or(Error::EmptyInput)
    }
}

/// Route the input by its first byte.
pub(crate) fn dispatch(data: &[u8], options: &DecodeOptions) -> Result<Decoded> {
    match data.first() {
        None => {
            debug!("empty input");
            Ok(Decoded::Empty)
        }
        Some(b'<') => {
            debug!("textual XML, {} bytes", data.len());
            parse_xml(data).map(Decoded::Text)
        }
        Some(&CryXmlHeader::MAGIC_START) => {
            debug!("binary XML, {} bytes", data.len());
            CryXml::parse(data)?.to_element(options).map(Decoded::Binary)
        }
        Some(&found) => Err(Error::UnrecognizedFormat { found }),
    }
}

/// Decode a byte buffer holding binary or textual XML with default options.
///
/// # Example
///
/// ```
/// use cryimport_cryxml::{decode, Decoded};
///
/// assert_eq!(decode(b"")?, Decoded::Empty);
///
/// let root = decode(br#"<Material Shader="Mech"/>"#)?.require_root()?;
/// assert_eq!(root.get("Shader"), Some("Mech"));
/// # Ok::<(), cryimport_cryxml::Error>(())
/// ```
pub fn decode(data: &[u8]) -> Result<Decoded> {
    DecodeOptions::default().decode(data)
}

/// Decode a byte buffer with explicit options.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Decoded> {
    options.decode(data)
}

/// Decode a byte buffer, failing with [`Error::EmptyInput`] if it is empty.
pub fn decode_root(data: &[u8]) -> Result<Element> {
    decode(data)?.require_root()
}

/// Read a source to the end and decode it with default options.
pub fn read<R: Read>(reader: R) -> Result<Decoded> {
    DecodeOptions::default().read(reader)
}

/// Open, read and decode a file with default options.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Decoded> {
    DecodeOptions::default().read_file(path)
}

/// Open, read and decode a file, failing with [`Error::EmptyInput`] if it is empty.
pub fn read_file_root<P: AsRef<Path>>(path: P) -> Result<Element> {
    read_file(path)?.require_root()
}
