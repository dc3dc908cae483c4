use crate::error::BufferError;

/// A growable byte vector with a non-decreasing read cursor.
///
/// Writes always append past the end; reads consume from `offset`, which
/// can never exceed `len`. Mirrors `srpc::buffer` from the original C++
/// reference (a `std::vector<uint8_t>` plus an offset field).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Buffer {
    bytes: Vec<u8>,
    offset: usize,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn append(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Bytes remaining between the read cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The unread tail of the buffer.
    pub fn peek(&self, len: usize) -> Result<&[u8], BufferError> {
        if self.offset + len > self.bytes.len() {
            return Err(BufferError::OutOfBounds);
        }
        Ok(&self.bytes[self.offset..self.offset + len])
    }

    /// Advances the read cursor by `len`, returning the bytes skipped over.
    pub fn advance(&mut self, len: usize) -> Result<&[u8], BufferError> {
        if self.offset + len > self.bytes.len() {
            return Err(BufferError::OutOfBounds);
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..self.offset])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn reset(&mut self) {
        self.bytes.clear();
        self.offset = 0;
    }
}
