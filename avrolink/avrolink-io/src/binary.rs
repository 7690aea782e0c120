use bytes::{Bytes, BytesMut};

/// Reusable output buffer for binary datum encoding.
///
/// Created by [`EncoderFactory`](crate::EncoderFactory). Encoded datums are
/// appended to the internal buffer until [`flush`](Self::flush) hands them out.
#[derive(Debug, Default)]
pub struct BinaryEncoder {
    buffer: BytesMut,
}

impl BinaryEncoder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Number of bytes written since the last flush.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Take everything written so far, leaving the encoder empty and reusable.
    pub fn flush(&mut self) -> Bytes {
        self.buffer.split().freeze()
    }
}

/// Reusable input buffer for binary datum decoding.
///
/// [`reset`](Self::reset) loads new input while keeping the allocated
/// scratch space of earlier inputs.
#[derive(Debug, Default)]
pub struct BinaryDecoder {
    buffer: BytesMut,
}

impl BinaryDecoder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    pub fn reset(&mut self, input: &[u8]) {
        self.buffer.clear();
        self.buffer.extend_from_slice(input);
    }

    /// Currently loaded input.
    pub fn input(&self) -> &[u8] {
        &self.buffer
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }
}
