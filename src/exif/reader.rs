//! Bounds-checked reads over an in-memory byte buffer.
//!
//! Every read is a pure function of `(buffer, offset, byte order)`. Out-of-range
//! reads return [`ExifError::Truncated`] instead of panicking, so a malformed or
//! partially uploaded file can never take the caller down.

use super::error::ExifError;

/// Byte order of multi-byte values inside a TIFF block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// `II` (Intel)
    Little,
    /// `MM` (Motorola)
    Big,
}

/// Read-only view over a byte slice.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], ExifError> {
        let truncated = ExifError::Truncated {
            offset,
            len,
            available: self.data.len(),
        };
        let end = offset.checked_add(len).ok_or_else(|| truncated.clone())?;
        self.data.get(offset..end).ok_or(truncated)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ExifError> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> Result<u16, ExifError> {
        let b = self.slice(offset, 2)?;
        let bytes = [b[0], b[1]];
        Ok(match order {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        })
    }

    pub fn read_u32(&self, offset: usize, order: ByteOrder) -> Result<u32, ExifError> {
        let b = self.slice(offset, 4)?;
        let bytes = [b[0], b[1], b[2], b[3]];
        Ok(match order {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }
}
