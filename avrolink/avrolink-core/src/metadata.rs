//! Out-of-band metadata traveling alongside encoded bytes.

use std::collections::{HashMap, hash_map};

use crate::{container::ContainerType, schema::Schema};

/// Common prefix of every key written by this crate.
pub const PREFIX: &str = "avro_";

/// Fully qualified type name of the encoded instance.
pub const PAYLOAD_FQCN: &str = "avro_payload_fqcn";

/// Kind name of the writer schema (`record`, `enum`, `string`, ...).
pub const SCHEMA_TYPE_NAME: &str = "avro_type";

/// Fully qualified name of the writer schema.
pub const SCHEMA_FULL_NAME: &str = "avro_schema_full_name";

/// Simple name of the writer schema.
pub const SCHEMA_NAME: &str = "avro_schema_name";

/// Namespace of the writer schema; only written for record, enum and fixed schemas.
pub const SCHEMA_NAMESPACE: &str = "avro_schema_namespace";

/// Content type for Avro-encoded payloads.
pub const MIME_AVRO: &str = "application/avro";

/// Content type for raw Avro binary datums.
pub const MIME_AVRO_BINARY: &str = "avro/binary";

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    Text(String),
    /// A type identity carried directly rather than by name.
    Type(ContainerType),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Type(_) => None,
        }
    }

    pub fn as_type(&self) -> Option<&ContainerType> {
        match self {
            Self::Type(container_type) => Some(container_type),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<ContainerType> for MetadataValue {
    fn from(value: ContainerType) -> Self {
        Self::Type(value)
    }
}

/// String-keyed metadata map. Entry order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(HashMap<String, MetadataValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Option<MetadataValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetadataValue::as_text)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Copy every entry of `other` whose key is not already present.
    pub fn extend_if_absent(&mut self, other: Metadata) {
        for (key, value) in other.0 {
            if let hash_map::Entry::Vacant(entry) = self.0.entry(key) {
                entry.insert(value);
            }
        }
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Metadata {
    type Item = (String, MetadataValue);
    type IntoIter = hash_map::IntoIter<String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Project a schema onto metadata.
///
/// Kind, name and full name are always written; the namespace only for
/// record, enum and fixed schemas (empty when the schema declares none).
pub fn project(schema: &Schema) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(SCHEMA_NAME, schema.name());
    metadata.insert(SCHEMA_FULL_NAME, schema.full_name());
    metadata.insert(SCHEMA_TYPE_NAME, schema.kind().as_str());
    if schema.kind().is_named() {
        metadata.insert(SCHEMA_NAMESPACE, schema.namespace().unwrap_or_default());
    }
    metadata
}

/// [`project`] plus the payload type name, as written on the encode path.
pub fn project_container(container_type: &ContainerType, schema: &Schema) -> Metadata {
    let mut metadata = project(schema);
    metadata.insert(PAYLOAD_FQCN, container_type.name());
    metadata
}
