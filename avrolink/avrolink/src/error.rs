//! Error type for the payload encoder and decoder.

use avrolink_core::{CodecError, ConfigurationError, SchemaError, TypeResolutionError};

/// Errors produced by [`PayloadEncoder`](crate::PayloadEncoder) and
/// [`PayloadDecoder`](crate::PayloadDecoder).
#[derive(Debug, thiserror::Error)]
pub enum AvroError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
