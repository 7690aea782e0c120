//! Schema-aware Avro encoding and decoding of typed payloads.
//!
//! [`PayloadEncoder`] turns a registered container value into Avro binary
//! plus schema metadata. [`PayloadDecoder`] reverses it, choosing the target
//! container type from that metadata through a [`TypeResolver`]. Schemas are
//! discovered by a [`SchemaRegistry`] and codecs shared through a
//! [`CodecCache`]; both are safe to share across threads.

mod catalog;
mod codec_cache;
mod decoder;
mod encoder;
mod error;
mod registry;
mod type_resolver;

pub use avrolink_core as core;
pub use avrolink_io as io;
pub use catalog::{TypeCatalog, TypeLoader};
pub use codec_cache::{CodecCache, ContainerCategory, ContainerReader};
pub use decoder::{
    DecodedPayload, PayloadDecoder, PayloadDecoderBuilder, SchemaStrategy, registry_writer_schema,
};
pub use encoder::{EncodedPayload, PayloadEncoder, PayloadEncoderBuilder};
pub use error::AvroError;
pub use registry::SchemaRegistry;
pub use type_resolver::{TypeExpression, TypeHint, TypeResolver, payload_type_hint, resolve_type};
