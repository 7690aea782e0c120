//! Schema, container and metadata types shared by the avrolink crates.
//!
//! This crate has no caches and performs no I/O. It defines the value types
//! ([`Schema`], [`SchemaPair`], [`ContainerType`], [`Metadata`]) and the
//! error taxonomy used by `avrolink-io` and `avrolink`.

mod container;
mod error;
mod generic;
pub mod metadata;
mod provider;
mod schema;

pub use apache_avro::types::Value;
pub use container::{ContainerKind, ContainerType, SpecificRecord};
pub use error::{CodecError, ConfigurationError, SchemaError, TypeResolutionError};
pub use generic::GenericRecord;
pub use metadata::{Metadata, MetadataValue};
pub use provider::{DeclaredSchema, Fallback, SchemaAccessor, SchemaProvider};
pub use schema::{CodecKey, Schema, SchemaKind, SchemaPair};
