use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

use apache_avro::schema::{DecimalSchema, EnumSchema, FixedSchema, RecordSchema};

use super::SchemaKind;
use crate::error::SchemaError;

/// Immutable, shareable schema handle.
///
/// Equality and hashing are structural: two schemas are equal when their JSON
/// serializations are identical, regardless of how the source documents were
/// formatted. Cloning is cheap.
#[derive(Clone)]
pub struct Schema(Arc<SchemaInner>);

struct SchemaInner {
    avro: apache_avro::Schema,
    identity: String,
    kind: SchemaKind,
    name: String,
    namespace: Option<String>,
    full_name: String,
}

impl Schema {
    /// Parse a JSON schema document.
    pub fn parse(json: &str) -> Result<Self, SchemaError> {
        let avro = apache_avro::Schema::parse_str(json).map_err(|source| SchemaError { source })?;
        Ok(Self::from_avro(avro))
    }

    pub fn from_avro(avro: apache_avro::Schema) -> Self {
        let identity = serde_json::to_string(&avro).unwrap_or_else(|_| avro.canonical_form());
        let kind = kind_of(&avro);
        let (name, namespace) = named(&avro).unwrap_or_else(|| (kind.as_str().to_string(), None));
        let full_name = match &namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
            _ => name.clone(),
        };

        Self(Arc::new(SchemaInner {
            avro,
            identity,
            kind,
            name,
            namespace,
            full_name,
        }))
    }

    pub fn kind(&self) -> SchemaKind {
        self.0.kind
    }

    /// Simple name. Unnamed schemas report their kind name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Namespace of a named schema, if declared.
    pub fn namespace(&self) -> Option<&str> {
        self.0.namespace.as_deref()
    }

    /// Fully qualified name (`namespace.name`). Unnamed schemas report their kind name.
    pub fn full_name(&self) -> &str {
        &self.0.full_name
    }

    /// The structural identity this schema is compared and hashed by.
    pub fn identity(&self) -> &str {
        &self.0.identity
    }

    pub fn as_avro(&self) -> &apache_avro::Schema {
        &self.0.avro
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.identity == other.0.identity
    }
}

impl Eq for Schema {}

impl Hash for Schema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.identity.hash(state);
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.0.kind)
            .field("full_name", &self.0.full_name)
            .finish()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.identity)
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<apache_avro::Schema> for Schema {
    fn from(value: apache_avro::Schema) -> Self {
        Self::from_avro(value)
    }
}

/// Name and namespace of a named schema. A decimal over `fixed` reports the
/// fixed type's name; a reference reports the name it points at.
fn named(avro: &apache_avro::Schema) -> Option<(String, Option<String>)> {
    use apache_avro::Schema as S;

    match avro {
        S::Record(RecordSchema { name, .. })
        | S::Enum(EnumSchema { name, .. })
        | S::Fixed(FixedSchema { name, .. })
        | S::Ref { name } => Some((name.name.clone(), name.namespace.clone())),
        S::Decimal(DecimalSchema { inner, .. }) => named(inner),
        S::Duration => Some((DURATION_NAME.to_string(), None)),
        _ => None,
    }
}

/// Name given to the `fixed` type underneath a `duration`.
const DURATION_NAME: &str = "duration";

/// Logical types report the kind they are stored as.
fn kind_of(avro: &apache_avro::Schema) -> SchemaKind {
    use apache_avro::Schema as S;

    match avro {
        S::Record(_) => SchemaKind::Record,
        S::Enum(_) => SchemaKind::Enum,
        S::Fixed(_) | S::Duration => SchemaKind::Fixed,
        S::Array(_) => SchemaKind::Array,
        S::Map(_) => SchemaKind::Map,
        S::Union(_) => SchemaKind::Union,
        S::Null => SchemaKind::Null,
        S::Boolean => SchemaKind::Boolean,
        S::Int | S::Date | S::TimeMillis => SchemaKind::Int,
        S::Long
        | S::TimeMicros
        | S::TimestampMillis
        | S::TimestampMicros
        | S::LocalTimestampMillis
        | S::LocalTimestampMicros => SchemaKind::Long,
        S::Float => SchemaKind::Float,
        S::Double => SchemaKind::Double,
        S::Bytes => SchemaKind::Bytes,
        S::String | S::Uuid => SchemaKind::String,
        S::Decimal(DecimalSchema { inner, .. }) => kind_of(inner),
        // The referenced definition is not carried by the reference itself.
        S::Ref { .. } => SchemaKind::Record,
    }
}
