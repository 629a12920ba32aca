//! CryXmlB binary XML decoder for CryEngine asset files.
//!
//! CryEngine stores material (`.mtl`), character definition (`.cdf`) and
//! prefab files either as plain XML or as CryXmlB, a binary container that
//! flattens the document into four tables: nodes, attribute references,
//! child order and a NUL-terminated string blob. This crate reads both and
//! returns the same owned [`Element`] tree either way.
//!
//! # Decoding
//!
//! The first byte selects the path: `<` is parsed as text, `C` as CryXmlB,
//! an empty input yields [`Decoded::Empty`] and anything else is
//! [`Error::UnrecognizedFormat`].
//!
//! Attribute values whose string offset does not resolve are replaced with
//! [`BUGGED_VALUE`] instead of failing the whole document.
//!
//! # Example
//!
//! ```no_run
//! use cryimport_cryxml::read_file_root;
//!
//! let root = read_file_root("objects/mechs/atlas/body/atlas_body.mtl")?;
//!
//! for material in root.iter("Material") {
//!     println!("{:?} uses {:?}", material.get("Name"), material.get("Shader"));
//! }
//! # Ok::<(), cryimport_cryxml::Error>(())
//! ```

mod decoder;
mod element;
mod error;
mod from_xml;
mod header;
mod node;
mod options;
mod parser;
mod reference;
mod strings;
mod tree;
mod writer;

#[cfg(feature = "parallel")]
mod parallel;

pub use decoder::{
    decode, decode_root, decode_with, read, read_file, read_file_root, Decoded, BUGGED_VALUE,
};
pub use element::{Attributes, Descendants, Element};
pub use error::{Error, Result};
pub use from_xml::parse_xml;
pub use header::CryXmlHeader;
pub use node::CryXmlNode;
pub use options::{DecodeOptions, RootPolicy};
pub use parser::CryXml;
pub use reference::CryXmlReference;
pub use strings::StringTable;
pub use writer::CryXmlWriter;

#[cfg(feature = "parallel")]
pub use parallel::read_files_parallel;
