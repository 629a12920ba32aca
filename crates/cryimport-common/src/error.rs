//! Error types for cryimport-common.

use thiserror::Error;

/// Common error type for cryimport operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer at {position}: needed {needed} bytes but only {available} available")]
    UnexpectedEof {
        position: usize,
        needed: usize,
        available: usize,
    },

    /// A NUL-terminated string ran to the end of the buffer.
    #[error("string starting at {position} is missing its null terminator")]
    MissingNullTerminator { position: usize },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// An attribute value could not be parsed into the requested type.
    #[error("invalid {kind} value {value:?}: {reason}")]
    InvalidValue {
        kind: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
