//! Binary datum I/O for `avrolink`.
//!
//! [`EncoderFactory`] and [`DecoderFactory`] hand out reusable scratch
//! objects; [`DatumWriter`] and [`DatumReader`] are the per-schema codecs
//! cached by the top-level crate; [`encode`] and [`decode`] drive one call.

mod binary;
mod codec;
mod datum;
mod factory;

pub use binary::{BinaryDecoder, BinaryEncoder};
pub use codec::{decode, encode};
pub use datum::{DatumReader, DatumWriter};
pub use factory::{
    DEFAULT_DECODER_BUFFER_SIZE, DEFAULT_ENCODER_BUFFER_SIZE, DecoderFactory, EncoderFactory,
    MAX_BUFFER_SIZE, MIN_BUFFER_SIZE,
};
