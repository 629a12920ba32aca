//! Binary reader for table-driven formats.
//!
//! [`BinaryReader`] is a seekable cursor over a byte slice. Every read is
//! bounds-checked, so a table that claims more records than the buffer holds
//! fails with [`Error::UnexpectedEof`] instead of being silently truncated.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A seekable little-endian reader over a byte slice.
///
/// # Example
///
/// ```
/// use cryimport_common::BinaryReader;
///
/// let data = [0x01, 0x00, 0x00, 0x00, b'h', b'i', 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_i32().unwrap(), 1);
/// assert_eq!(reader.read_cstring().unwrap(), "hi");
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    ///
    /// Seeking past the end is allowed; the next read reports the EOF.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                position: self.position,
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_bytes(2)?;
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a null-terminated UTF-8 string and skip its terminator.
    pub fn read_cstring(&mut self) -> Result<&'a str> {
        let start = self.position;
        let remaining = self.remaining_bytes();

        let null_pos = memchr::memchr(0, remaining)
            .ok_or(Error::MissingNullTerminator { position: start })?;

        self.position = start + null_pos + 1;
        std::str::from_utf8(&remaining[..null_pos]).map_err(Error::Utf8)
    }

    /// Read a fixed-layout record using zerocopy.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let position = self.position;
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            position,
            needed: size,
            available: bytes.len(),
        })
    }

    /// Read `count` consecutive fixed-layout records.
    pub fn read_array<T: FromBytes>(&mut self, count: usize) -> Result<Vec<T>> {
        // Check the whole table up front so a bogus count cannot trigger a huge allocation.
        let needed = count.saturating_mul(std::mem::size_of::<T>());
        self.peek_bytes(needed)?;

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.read_struct::<T>()?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // i32: 0x04030201
            0xFF, 0xFF, // i16: -1
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_i32().unwrap(), 0x04030201);
        assert_eq!(reader.read_i16().unwrap(), -1);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_cstring() {
        let data = b"hello\0world\0";
        let mut reader = BinaryReader::new(data);

        assert_eq!(reader.read_cstring().unwrap(), "hello");
        assert_eq!(reader.position(), 6);
        assert_eq!(reader.read_cstring().unwrap(), "world");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_cstring_missing_terminator() {
        let data = b"ok\0dangling";
        let mut reader = BinaryReader::new(data);

        assert_eq!(reader.read_cstring().unwrap(), "ok");
        assert!(matches!(
            reader.read_cstring(),
            Err(Error::MissingNullTerminator { position: 3 })
        ));
    }

    #[test]
    fn test_seek_past_end_fails_on_read() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);
        reader.seek(16);

        assert_eq!(reader.remaining(), 0);
        assert!(matches!(
            reader.read_i32(),
            Err(Error::UnexpectedEof { position: 16, needed: 4, available: 0 })
        ));
    }

    #[test]
    fn test_read_array_checks_bounds_first() {
        let data = [0u8; 10];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.read_array::<[u8; 4]>(3).is_err());
        assert_eq!(reader.position(), 0);

        let items = reader.read_array::<[u8; 4]>(2).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(reader.remaining(), 2);
    }
}
