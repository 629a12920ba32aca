//! CryXmlB string table.

use std::collections::HashMap;

use cryimport_common::BinaryReader;

use crate::{Error, Result};

/// Strings of the content region, keyed by offset from the region start.
///
/// Names and values are only resolvable at the exact start of a string;
/// an offset pointing into the middle of one does not resolve.
#[derive(Debug, Default)]
pub struct StringTable<'a> {
    strings: HashMap<i32, &'a str>,
}

impl<'a> StringTable<'a> {
    /// Scan the NUL-terminated strings from `content_offset` until the
    /// position reaches `file_length`.
    ///
    /// A string that reaches `file_length` (or the end of `data`) without a
    /// terminator fails with [`Error::TruncatedString`].
    pub fn scan(data: &'a [u8], content_offset: usize, file_length: usize) -> Result<Self> {
        let end = file_length.min(data.len());
        let mut reader = BinaryReader::new(&data[..end]);
        reader.seek(content_offset);

        let mut strings = HashMap::new();
        while reader.position() < file_length {
            let start = reader.position();
            let value = reader.read_cstring().map_err(|e| match e {
                cryimport_common::Error::MissingNullTerminator { position } => {
                    Error::TruncatedString { offset: position }
                }
                other => Error::Common(other),
            })?;
            // start < file_length, and file_length came from an i32
            strings.insert((start - content_offset) as i32, value);
        }

        Ok(Self { strings })
    }

    /// Resolve a string by its offset into the content region.
    pub fn get(&self, offset: i32) -> Option<&'a str> {
        self.strings.get(&offset).copied()
    }

    /// Number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table holds no strings.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
