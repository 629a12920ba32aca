//! Error types for CryXmlB decoding and encoding.

use thiserror::Error;

/// Errors that can occur when decoding or encoding CryXmlB documents.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error, typically a table read past the end of the input.
    #[error("{0}")]
    Common(#[from] cryimport_common::Error),

    /// The input holds no bytes.
    #[error("input is empty")]
    EmptyInput,

    /// The first byte is neither `<` nor the start of the binary magic.
    #[error("unrecognized format: first byte {found:#04x} is neither '<' nor 'C'")]
    UnrecognizedFormat { found: u8 },

    /// A NUL-terminated string reached the end of the file without a terminator.
    #[error("string at byte {offset} runs past the end of the file without a terminator")]
    TruncatedString { offset: usize },

    /// A node tag or attribute name offset does not resolve in the string table.
    #[error("node {node_id}: name offset {offset} does not resolve in the string table")]
    UnresolvedName { node_id: usize, offset: i32 },

    /// A header offset or count is negative.
    #[error("header field {field} is negative ({value})")]
    NegativeField { field: &'static str, value: i32 },

    /// A node consumes more attribute records than the reference table holds.
    #[error("node {node_id}: attribute index {index} out of bounds (total references: {count})")]
    AttributeIndexOutOfBounds {
        node_id: usize,
        index: usize,
        count: usize,
    },

    /// The node table produced no root element.
    #[error("document has no root node")]
    MissingRoot,

    /// More than one node has no materialized parent and the options reject that.
    #[error("nodes {first} and {second} are both unparented")]
    MultipleRoots { first: usize, second: usize },

    /// A tree exceeds what the binary record fields can express.
    #[error("too many {what}: {count} exceeds the format limit")]
    TooManyItems { what: &'static str, count: usize },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for CryXmlB operations.
pub type Result<T> = std::result::Result<T, Error>;
