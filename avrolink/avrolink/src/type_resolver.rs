use std::{fmt, sync::Arc};

use avrolink_core::{
    ContainerType, Metadata, MetadataValue, TypeResolutionError, metadata::PAYLOAD_FQCN,
};
use tracing::debug;

use crate::catalog::TypeLoader;

/// Result of evaluating a [`TypeExpression`] against metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// A type identity, used as is.
    Type(ContainerType),
    /// A fully qualified type name, resolved through the [`TypeLoader`].
    Name(String),
    Absent,
}

impl From<Option<&MetadataValue>> for TypeHint {
    fn from(value: Option<&MetadataValue>) -> Self {
        match value {
            Some(MetadataValue::Type(container_type)) => Self::Type(container_type.clone()),
            Some(MetadataValue::Text(name)) => Self::Name(name.clone()),
            None => Self::Absent,
        }
    }
}

/// Caller-supplied hook computing a [`TypeHint`] from incoming metadata.
pub type TypeExpression = Arc<dyn Fn(&Metadata) -> TypeHint + Send + Sync>;

/// The default type expression: the `avro_payload_fqcn` entry.
pub fn payload_type_hint(metadata: &Metadata) -> TypeHint {
    TypeHint::from(metadata.get(PAYLOAD_FQCN))
}

/// Determine the container type to decode into.
///
/// A type identity from `expression` wins, then a type name loaded through
/// `loader`, then `default_type`. A name that cannot be loaded is an error
/// even when a default is configured.
pub fn resolve_type(
    metadata: &Metadata,
    expression: &dyn Fn(&Metadata) -> TypeHint,
    default_type: Option<&ContainerType>,
    loader: &dyn TypeLoader,
) -> Result<ContainerType, TypeResolutionError> {
    match expression(metadata) {
        TypeHint::Type(container_type) => Ok(container_type),
        TypeHint::Name(type_name) => loader.load(&type_name).ok_or_else(|| {
            debug!(type_name = type_name.as_str(), "container type cannot be loaded");
            TypeResolutionError::UnknownType { type_name }
        }),
        TypeHint::Absent => default_type
            .cloned()
            .ok_or(TypeResolutionError::Undetermined),
    }
}

/// [`resolve_type`] with its inputs bound.
#[derive(Clone)]
pub struct TypeResolver {
    loader: Arc<dyn TypeLoader>,
    expression: TypeExpression,
    default_type: Option<ContainerType>,
}

impl TypeResolver {
    /// Resolver using [`payload_type_hint`] and no default type.
    pub fn new(loader: Arc<dyn TypeLoader>) -> Self {
        Self {
            loader,
            expression: Arc::new(payload_type_hint),
            default_type: None,
        }
    }

    pub fn with_expression<F>(mut self, expression: F) -> Self
    where
        F: Fn(&Metadata) -> TypeHint + Send + Sync + 'static,
    {
        self.expression = Arc::new(expression);
        self
    }

    pub fn with_default_type(mut self, default_type: ContainerType) -> Self {
        self.default_type = Some(default_type);
        self
    }

    pub fn default_type(&self) -> Option<&ContainerType> {
        self.default_type.as_ref()
    }

    pub fn resolve(&self, metadata: &Metadata) -> Result<ContainerType, TypeResolutionError> {
        resolve_type(
            metadata,
            self.expression.as_ref(),
            self.default_type.as_ref(),
            self.loader.as_ref(),
        )
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver")
            .field("default_type", &self.default_type)
            .finish_non_exhaustive()
    }
}
