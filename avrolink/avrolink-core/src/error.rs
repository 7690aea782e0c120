//! Error types shared by the avrolink crates.

/// A schema document could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse schema: {source}")]
pub struct SchemaError {
    #[source]
    pub source: apache_avro::Error,
}

/// Caller-side misconfiguration. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A schema pair was requested with neither a reader nor a writer schema.
    #[error("at least one of the reader or writer schema must be present")]
    MissingSchemas,

    /// A frozen encoder/decoder factory received a reconfiguration request.
    #[error("immutable {factory} cannot be configured (attempted to set {setting})")]
    ImmutableFactory {
        factory: &'static str,
        setting: &'static str,
    },

    /// No schema can be inferred from the container type and none was configured.
    #[error(
        "no schema can be inferred from type '{type_name}' and no schema has been explicitly configured"
    )]
    NoSchema { type_name: String },

    /// The payload handed to an encoder is not a registered container type.
    /// Only the `TypeId` of a `dyn Any` payload is known at this point.
    #[error("payload with {type_id:?} is not a registered container type")]
    UnregisteredPayload { type_id: std::any::TypeId },
}

/// The target container type of a decode could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeResolutionError {
    /// No type, no type name and no default type.
    #[error("could not determine the container type from metadata and no default type is configured")]
    Undetermined,

    /// A type name was supplied but no such type can be loaded.
    #[error("container type '{type_name}' cannot be loaded")]
    UnknownType { type_name: String },
}

/// Binary encode/decode failure. The original cause is retained.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The datum could not be written with the writer schema.
    #[error("failed to encode datum for schema '{schema_name}': {source}")]
    Encode {
        schema_name: String,
        #[source]
        source: apache_avro::Error,
    },

    /// The input bytes could not be read with the writer/reader schemas.
    #[error("failed to decode datum for schema '{schema_name}': {source}")]
    Decode {
        schema_name: String,
        #[source]
        source: apache_avro::Error,
    },

    /// A container instance could not be converted into a datum.
    #[error("failed to convert '{type_name}' into a datum: {source}")]
    ToDatum {
        type_name: String,
        #[source]
        source: apache_avro::Error,
    },

    /// A datum could not be materialized into a container instance.
    #[error("failed to materialize '{type_name}' from a datum: {source}")]
    FromDatum {
        type_name: String,
        #[source]
        source: apache_avro::Error,
    },

    /// The instance handed to a container type is of another Rust type.
    #[error("expected an instance of '{expected}'")]
    TypeMismatch { expected: String },
}
