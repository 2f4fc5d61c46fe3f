//! Checked little-endian reads over a byte slice.

use crate::error::FormatError;

/// Byte cursor over the binary stream.
///
/// Every read checks the remaining length first and fails with the offset
/// where the read began, so a truncated stream reports where the record
/// fell apart instead of panicking.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset from the start of the stream.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute offset (used to rewind a speculative read).
    pub(crate) fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Bytes left in the stream.
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], FormatError> {
        if self.remaining() < count {
            return Err(FormatError::truncated(self.pos, count));
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, FormatError> {
        // Length is checked by read_bytes, so the conversion cannot fail
        let bytes: [u8; 4] = self.read_bytes(4)?.try_into().unwrap();
        Ok(i32::from_le_bytes(bytes))
    }

    pub(crate) fn read_f64(&mut self) -> Result<f64, FormatError> {
        let bytes: [u8; 8] = self.read_bytes(8)?.try_into().unwrap();
        Ok(f64::from_le_bytes(bytes))
    }
}
