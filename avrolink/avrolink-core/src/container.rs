//! Container type identities and their classification.

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use apache_avro::types::Value;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::CodecError,
    generic::GenericRecord,
    provider::{DeclaredSchema, SchemaAccessor, SchemaProvider},
    schema::Schema,
};

/// A Rust type statically bound to exactly one schema.
///
/// The schema is discovered by trying [`SCHEMA`](Self::SCHEMA) first and
/// [`class_schema`](Self::class_schema) second.
pub trait SpecificRecord: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Fully qualified type name reported in outgoing metadata and used for
    /// name-based lookup on decode.
    const TYPE_NAME: &'static str;

    /// JSON schema descriptor declared on the type.
    const SCHEMA: Option<&'static str> = None;

    /// Schema accessor, consulted when no descriptor is declared.
    fn class_schema() -> Option<Schema> {
        None
    }
}

/// How a container type relates to its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Statically bound to one schema ([`SpecificRecord`]).
    Specific,
    /// Carries its schema per instance ([`GenericRecord`]).
    Generic,
    /// No intrinsic schema; one must be supplied externally.
    Reflective,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Generic => "generic",
            Self::Reflective => "reflective",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type ToDatumFn = fn(&dyn Any) -> Result<Value, CodecError>;
type FromDatumFn = fn(Value, &Schema) -> Result<Box<dyn Any + Send>, CodecError>;
type FromDatumIntoFn = fn(Value, &Schema, &mut dyn Any) -> Result<(), CodecError>;
type InstanceSchemaFn = fn(&dyn Any) -> Option<Schema>;

/// Identity of a container type (not a value).
///
/// Carries everything needed to move between instances of the Rust type and
/// schema-shaped datums without knowing the type statically. Two handles are
/// equal when they describe the same Rust type under the same name.
#[derive(Clone)]
pub struct ContainerType(Arc<Descriptor>);

struct Descriptor {
    name: String,
    type_id: TypeId,
    kind: ContainerKind,
    provider: Option<Arc<dyn SchemaProvider>>,
    to_datum: ToDatumFn,
    from_datum: FromDatumFn,
    from_datum_into: FromDatumIntoFn,
    instance_schema: InstanceSchemaFn,
}

impl ContainerType {
    /// Container type for a [`SpecificRecord`].
    pub fn specific<T: SpecificRecord>() -> Self {
        let provider = DeclaredSchema::new(T::TYPE_NAME, T::SCHEMA)
            .or(SchemaAccessor::new(T::TYPE_NAME, T::class_schema));
        Self(Arc::new(Descriptor {
            name: T::TYPE_NAME.to_string(),
            type_id: TypeId::of::<T>(),
            kind: ContainerKind::Specific,
            provider: Some(Arc::new(provider)),
            to_datum: serde_to_datum::<T>,
            from_datum: serde_from_datum::<T>,
            from_datum_into: serde_from_datum_into::<T>,
            instance_schema: no_instance_schema,
        }))
    }

    /// Container type for a serde type without an intrinsic schema.
    pub fn reflective<T>(name: impl Into<String>) -> Self
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        Self(Arc::new(Descriptor {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            kind: ContainerKind::Reflective,
            provider: None,
            to_datum: serde_to_datum::<T>,
            from_datum: serde_from_datum::<T>,
            from_datum_into: serde_from_datum_into::<T>,
            instance_schema: no_instance_schema,
        }))
    }

    /// Container type for [`GenericRecord`].
    pub fn generic() -> Self {
        Self(Arc::new(Descriptor {
            name: GenericRecord::TYPE_NAME.to_string(),
            type_id: TypeId::of::<GenericRecord>(),
            kind: ContainerKind::Generic,
            provider: None,
            to_datum: generic_to_datum,
            from_datum: generic_from_datum,
            from_datum_into: generic_from_datum_into,
            instance_schema: generic_instance_schema,
        }))
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn type_id(&self) -> TypeId {
        self.0.type_id
    }

    pub fn kind(&self) -> ContainerKind {
        self.0.kind
    }

    /// Static schema discovery strategy, present for specific types only.
    pub fn schema_provider(&self) -> Option<&dyn SchemaProvider> {
        self.0.provider.as_deref()
    }

    /// Returns `true` if `instance` is a value of this container type.
    pub fn is_instance(&self, instance: &dyn Any) -> bool {
        instance.type_id() == self.0.type_id
    }

    /// Schema carried by the instance itself (generic containers only).
    pub fn instance_schema(&self, instance: &dyn Any) -> Option<Schema> {
        (self.0.instance_schema)(instance)
    }

    pub fn to_datum(&self, instance: &dyn Any) -> Result<Value, CodecError> {
        (self.0.to_datum)(instance)
    }

    /// Build a new instance from a datum read with `reader` as reader schema.
    pub fn from_datum(&self, datum: Value, reader: &Schema) -> Result<Box<dyn Any + Send>, CodecError> {
        (self.0.from_datum)(datum, reader)
    }

    /// Overwrite `target` in place with the instance built from `datum`.
    pub fn from_datum_into(
        &self,
        datum: Value,
        reader: &Schema,
        target: &mut dyn Any,
    ) -> Result<(), CodecError> {
        (self.0.from_datum_into)(datum, reader, target)
    }
}

impl PartialEq for ContainerType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.type_id == other.0.type_id && self.0.name == other.0.name)
    }
}

impl Eq for ContainerType {}

impl Hash for ContainerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.type_id.hash(state);
        self.0.name.hash(state);
    }
}

impl fmt::Debug for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerType")
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .finish()
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

fn downcast<T: 'static>(instance: &dyn Any) -> Result<&T, CodecError> {
    instance
        .downcast_ref::<T>()
        .ok_or_else(|| CodecError::TypeMismatch {
            expected: type_name::<T>().to_string(),
        })
}

fn serde_to_datum<T: Serialize + 'static>(instance: &dyn Any) -> Result<Value, CodecError> {
    apache_avro::to_value(downcast::<T>(instance)?).map_err(|source| CodecError::ToDatum {
        type_name: type_name::<T>().to_string(),
        source,
    })
}

fn serde_from_datum<T: DeserializeOwned + Send + 'static>(
    datum: Value,
    _reader: &Schema,
) -> Result<Box<dyn Any + Send>, CodecError> {
    let instance: T = apache_avro::from_value(&datum).map_err(|source| CodecError::FromDatum {
        type_name: type_name::<T>().to_string(),
        source,
    })?;
    Ok(Box::new(instance))
}

fn serde_from_datum_into<T: DeserializeOwned + 'static>(
    datum: Value,
    _reader: &Schema,
    target: &mut dyn Any,
) -> Result<(), CodecError> {
    let target = target
        .downcast_mut::<T>()
        .ok_or_else(|| CodecError::TypeMismatch {
            expected: type_name::<T>().to_string(),
        })?;
    *target = apache_avro::from_value(&datum).map_err(|source| CodecError::FromDatum {
        type_name: type_name::<T>().to_string(),
        source,
    })?;
    Ok(())
}

fn no_instance_schema(_instance: &dyn Any) -> Option<Schema> {
    None
}

fn generic_to_datum(instance: &dyn Any) -> Result<Value, CodecError> {
    Ok(downcast::<GenericRecord>(instance)?.datum().clone())
}

fn generic_from_datum(datum: Value, reader: &Schema) -> Result<Box<dyn Any + Send>, CodecError> {
    Ok(Box::new(GenericRecord::new(reader.clone(), datum)))
}

fn generic_from_datum_into(
    datum: Value,
    reader: &Schema,
    target: &mut dyn Any,
) -> Result<(), CodecError> {
    let target = target
        .downcast_mut::<GenericRecord>()
        .ok_or_else(|| CodecError::TypeMismatch {
            expected: GenericRecord::TYPE_NAME.to_string(),
        })?;
    *target = GenericRecord::new(reader.clone(), datum);
    Ok(())
}

fn generic_instance_schema(instance: &dyn Any) -> Option<Schema> {
    instance
        .downcast_ref::<GenericRecord>()
        .map(|record| record.schema().clone())
}
