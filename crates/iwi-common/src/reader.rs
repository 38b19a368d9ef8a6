//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! little-endian data from a byte slice without copying.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// Every read is bounds-checked; running off the end of the buffer yields
/// [`Error::UnexpectedEof`] and leaves the position untouched.
///
/// # Example
///
/// ```
/// use iwi_common::BinaryReader;
///
/// let data = [b'I', b'W', b'i', 0x05, 0x10, 0x00, 0x00, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// reader.expect_magic(b"IWi").unwrap();
/// assert_eq!(reader.read_bytes(1).unwrap(), &[0x05]);
/// assert_eq!(reader.read_i32_vec(1).unwrap(), vec![16]);
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
    /// Seeking to exactly the end of the buffer is allowed.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::SeekOutOfBounds {
                position,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
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

    /// Read `count` consecutive little-endian i32 values.
    ///
    /// Fails without consuming anything if the whole run is not available.
    pub fn read_i32_vec(&mut self, count: usize) -> Result<Vec<i32>> {
        let needed = count.checked_mul(4).unwrap_or(usize::MAX);
        let bytes = self.read_bytes(needed)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
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

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, FromBytes)]
    #[repr(C)]
    struct Pair {
        tag: [u8; 2],
        count: [u8; 2],
    }

    #[test]
    fn test_read_struct() {
        let data = [b'A', b'B', 0x02, 0x00, 0xFF];
        let mut reader = BinaryReader::new(&data);

        let pair: Pair = reader.read_struct().unwrap();
        assert_eq!(pair, Pair { tag: *b"AB", count: [2, 0] });
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_read_i32_vec() {
        let data = [0x10, 0, 0, 0, 0xF0, 0xFF, 0xFF, 0xFF];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_i32_vec(2).unwrap(), vec![16, -16]);
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_read_i32_vec_short_does_not_advance() {
        let data = [0u8; 7];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_i32_vec(2),
            Err(Error::UnexpectedEof { needed: 8, available: 7, .. })
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_seek_bounds() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);

        reader.seek(4).unwrap();
        assert!(reader.is_empty());
        assert!(matches!(
            reader.seek(5),
            Err(Error::SeekOutOfBounds { position: 5, len: 4 })
        ));
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_expect_magic() {
        let mut reader = BinaryReader::new(b"IWi\x05");
        reader.expect_magic(b"IWi").unwrap();
        assert_eq!(reader.read_bytes(1).unwrap(), &[5]);

        let mut reader = BinaryReader::new(b"DDS ");
        assert!(matches!(reader.expect_magic(b"IWi"), Err(Error::InvalidMagic { .. })));
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_struct::<Pair>(),
            Err(Error::UnexpectedEof { position: 0, needed: 4, available: 2 })
        ));
        assert_eq!(reader.read_bytes(2).unwrap(), &[0x01, 0x02]);
    }
}
