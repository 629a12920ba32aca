//! Error types for asset interpretation.

use thiserror::Error;

/// Errors that can occur when interpreting decoded asset files.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be decoded.
    #[error("{0}")]
    CryXml(#[from] cryimport_cryxml::Error),

    /// An attribute value could not be parsed.
    #[error("{0}")]
    Value(#[from] cryimport_common::Error),

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, Error>;
