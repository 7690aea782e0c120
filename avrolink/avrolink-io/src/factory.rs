use avrolink_core::ConfigurationError;

use crate::binary::{BinaryDecoder, BinaryEncoder};

/// Smallest accepted scratch buffer size.
pub const MIN_BUFFER_SIZE: usize = 32;

/// Largest accepted scratch buffer size.
pub const MAX_BUFFER_SIZE: usize = 16 * 1024 * 1024;

pub const DEFAULT_ENCODER_BUFFER_SIZE: usize = 2048;
pub const DEFAULT_DECODER_BUFFER_SIZE: usize = 8192;

const fn clamp_buffer_size(size: usize) -> usize {
    if size < MIN_BUFFER_SIZE {
        MIN_BUFFER_SIZE
    } else if size > MAX_BUFFER_SIZE {
        MAX_BUFFER_SIZE
    } else {
        size
    }
}

/// Creates [`BinaryEncoder`]s with a configured initial buffer size.
///
/// A factory is either configurable ([`new`](Self::new)) or frozen
/// ([`immutable`](Self::immutable), [`DEFAULT`](Self::DEFAULT),
/// [`freeze`](Self::freeze)). Configuring a frozen factory fails and leaves it
/// unchanged. Sizes are clamped to `MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderFactory {
    buffer_size: usize,
    frozen: bool,
}

impl EncoderFactory {
    /// Process-wide frozen factory with the default buffer size.
    pub const DEFAULT: Self = Self::immutable(DEFAULT_ENCODER_BUFFER_SIZE);

    pub const fn new() -> Self {
        Self {
            buffer_size: DEFAULT_ENCODER_BUFFER_SIZE,
            frozen: false,
        }
    }

    pub const fn immutable(buffer_size: usize) -> Self {
        Self {
            buffer_size: clamp_buffer_size(buffer_size),
            frozen: true,
        }
    }

    pub fn configure_buffer_size(&mut self, size: usize) -> Result<&mut Self, ConfigurationError> {
        if self.frozen {
            return Err(ConfigurationError::ImmutableFactory {
                factory: "EncoderFactory",
                setting: "buffer_size",
            });
        }
        self.buffer_size = clamp_buffer_size(size);
        Ok(self)
    }

    pub fn freeze(mut self) -> Self {
        self.frozen = true;
        self
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn binary_encoder(&self) -> BinaryEncoder {
        BinaryEncoder::with_capacity(self.buffer_size)
    }
}

impl Default for EncoderFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates [`BinaryDecoder`]s. Same configure/freeze rules as [`EncoderFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderFactory {
    buffer_size: usize,
    frozen: bool,
}

impl DecoderFactory {
    /// Process-wide frozen factory with the default buffer size.
    pub const DEFAULT: Self = Self::immutable(DEFAULT_DECODER_BUFFER_SIZE);

    pub const fn new() -> Self {
        Self {
            buffer_size: DEFAULT_DECODER_BUFFER_SIZE,
            frozen: false,
        }
    }

    pub const fn immutable(buffer_size: usize) -> Self {
        Self {
            buffer_size: clamp_buffer_size(buffer_size),
            frozen: true,
        }
    }

    pub fn configure_buffer_size(&mut self, size: usize) -> Result<&mut Self, ConfigurationError> {
        if self.frozen {
            return Err(ConfigurationError::ImmutableFactory {
                factory: "DecoderFactory",
                setting: "buffer_size",
            });
        }
        self.buffer_size = clamp_buffer_size(size);
        Ok(self)
    }

    pub fn freeze(mut self) -> Self {
        self.frozen = true;
        self
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn binary_decoder(&self) -> BinaryDecoder {
        BinaryDecoder::with_capacity(self.buffer_size)
    }
}

impl Default for DecoderFactory {
    fn default() -> Self {
        Self::new()
    }
}
