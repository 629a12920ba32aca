//! Decode configuration.

use std::io::Read;
use std::path::Path;

use crate::decoder::{self, Decoded};
use crate::Result;

/// What to do when more than one node has no materialized parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootPolicy {
    /// The last unparented node becomes the root; earlier candidates and
    /// their subtrees are dropped with a warning.
    #[default]
    LastWins,
    /// Fail with [`Error::MultipleRoots`](crate::Error::MultipleRoots).
    Reject,
}

/// Options controlling a decode.
///
/// # Example
///
/// ```no_run
/// use cryimport_cryxml::{DecodeOptions, RootPolicy};
///
/// let decoded = DecodeOptions::new()
///     .with_root_policy(RootPolicy::Reject)
///     .read_file("mech_body.mtl")?;
/// # Ok::<(), cryimport_cryxml::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Multiple-root handling for binary documents.
    pub root_policy: RootPolicy,
}

impl DecodeOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the multiple-root policy.
    #[inline]
    pub fn with_root_policy(mut self, policy: RootPolicy) -> Self {
        self.root_policy = policy;
        self
    }

    /// Decode a byte buffer holding binary or textual XML.
    pub fn decode(&self, data: &[u8]) -> Result<Decoded> {
        decoder::dispatch(data, self)
    }

    /// Read a source to the end and decode it.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Decoded> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.decode(&data)
    }

    /// Open, read and decode a file. The handle is closed before returning.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Decoded> {
        let path = path.as_ref();
        log::debug!("decoding {}", path.display());
        let data = std::fs::read(path)?;
        self.decode(&data)
    }
}
