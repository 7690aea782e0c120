use std::{
    any::Any,
    sync::{Arc, OnceLock},
};

use avrolink_core::{
    CodecError, CodecKey, ConfigurationError, ContainerKind, ContainerType, Schema, SchemaPair,
};
use avrolink_io::{BinaryDecoder, DatumReader, DatumWriter, decode};
use dashmap::DashMap;
use tracing::{debug, trace, warn};

use crate::registry::SchemaRegistry;

/// A container type classified into the codec family that handles it, with
/// the schema that family falls back to when no reader schema is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerCategory {
    /// Reader schema defaults to the type's own schema.
    Specific(Option<Schema>),
    /// No default; a schema must be supplied.
    Generic,
    /// Reader schema defaults to the schema registered for the type.
    Reflective(Option<Schema>),
}

impl ContainerCategory {
    pub fn classify(container_type: &ContainerType, registry: &SchemaRegistry) -> Self {
        match container_type.kind() {
            ContainerKind::Specific => Self::Specific(registry.resolve(container_type)),
            ContainerKind::Generic => Self::Generic,
            ContainerKind::Reflective => Self::Reflective(registry.resolve(container_type)),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Specific(_) => ContainerKind::Specific,
            Self::Generic => ContainerKind::Generic,
            Self::Reflective(_) => ContainerKind::Reflective,
        }
    }

    fn default_reader(&self) -> Option<&Schema> {
        match self {
            Self::Specific(schema) | Self::Reflective(schema) => schema.as_ref(),
            Self::Generic => None,
        }
    }

    /// Effective schema pair for a decode into this category.
    pub fn schema_pair(
        &self,
        container_type: &ContainerType,
        writer: Option<&Schema>,
        reader: Option<&Schema>,
    ) -> Result<SchemaPair, ConfigurationError> {
        let reader = reader.or_else(|| self.default_reader());
        SchemaPair::of(reader.cloned(), writer.cloned()).map_err(|_| ConfigurationError::NoSchema {
            type_name: container_type.name().to_string(),
        })
    }
}

/// Decode codec bound to a target container type.
#[derive(Debug)]
pub struct ContainerReader {
    kind: ContainerKind,
    container_type: ContainerType,
    datum_reader: Arc<DatumReader>,
}

impl ContainerReader {
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn container_type(&self) -> &ContainerType {
        &self.container_type
    }

    pub fn datum_reader(&self) -> &Arc<DatumReader> {
        &self.datum_reader
    }

    pub fn reader_schema(&self) -> &Schema {
        self.datum_reader.reader_schema()
    }

    pub fn writer_schema(&self) -> &Schema {
        self.datum_reader.writer_schema()
    }

    /// Decode `bytes` into a new instance of the target type.
    pub fn read(
        &self,
        bytes: &[u8],
        decoder: &mut BinaryDecoder,
    ) -> Result<Box<dyn Any + Send>, CodecError> {
        let datum = decode(bytes, &self.datum_reader, decoder)?;
        self.container_type.from_datum(datum, self.reader_schema())
    }

    /// Decode `bytes`, overwriting `target` in place.
    pub fn read_into(
        &self,
        bytes: &[u8],
        decoder: &mut BinaryDecoder,
        target: &mut dyn Any,
    ) -> Result<(), CodecError> {
        let datum = decode(bytes, &self.datum_reader, decoder)?;
        self.container_type
            .from_datum_into(datum, self.reader_schema(), target)
    }
}

/// Shares datum writers and readers across callers and threads.
///
/// Writers are keyed by schema. Readers are cached twice: by effective
/// writer/reader schemas, and by target container type plus schema pair.
/// Codecs are built outside the map locks; concurrent first uses converge on
/// whichever instance is inserted first.
#[derive(Debug)]
pub struct CodecCache {
    registry: Arc<SchemaRegistry>,
    writers: DashMap<Schema, Arc<DatumWriter>>,
    datum_readers: DashMap<CodecKey, Arc<DatumReader>>,
    readers: DashMap<(ContainerType, SchemaPair), Arc<ContainerReader>>,
}

impl CodecCache {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            writers: DashMap::new(),
            datum_readers: DashMap::new(),
            readers: DashMap::new(),
        }
    }

    /// The process-wide cache, backed by [`SchemaRegistry::global`].
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<CodecCache>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(Self::new(SchemaRegistry::global())))
            .clone()
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Pair a registry with a cache that classifies against that same
    /// registry. An explicit registry wins: a cache built over a different
    /// registry is replaced by a fresh one. Unset halves default to the
    /// other half, or to the process-wide instances.
    pub fn pair_with_registry(
        registry: Option<Arc<SchemaRegistry>>,
        cache: Option<Arc<Self>>,
    ) -> (Arc<SchemaRegistry>, Arc<Self>) {
        match (registry, cache) {
            (Some(registry), Some(cache)) if Arc::ptr_eq(&registry, cache.registry()) => {
                (registry, cache)
            }
            (Some(registry), Some(_)) => {
                warn!("codec cache is backed by another registry, using a fresh cache");
                let cache = Arc::new(Self::new(registry.clone()));
                (registry, cache)
            }
            (Some(registry), None) => {
                let cache = Arc::new(Self::new(registry.clone()));
                (registry, cache)
            }
            (None, Some(cache)) => (cache.registry().clone(), cache),
            (None, None) => (SchemaRegistry::global(), Self::global()),
        }
    }

    pub fn classify(&self, container_type: &ContainerType) -> ContainerCategory {
        ContainerCategory::classify(container_type, &self.registry)
    }

    pub fn writer_codec(&self, schema: &Schema) -> Arc<DatumWriter> {
        if let Some(writer) = self.writers.get(schema) {
            return writer.clone();
        }
        let built = Arc::new(DatumWriter::new(schema.clone()));
        debug!(schema = schema.full_name(), "created datum writer");
        self.writers.entry(schema.clone()).or_insert(built).clone()
    }

    /// Reader decoding into `container_type`.
    ///
    /// A missing reader schema defaults per [`ContainerCategory`]; a missing
    /// writer schema is substituted by the reader schema.
    pub fn reader_codec(
        &self,
        container_type: &ContainerType,
        writer: Option<&Schema>,
        reader: Option<&Schema>,
    ) -> Result<Arc<ContainerReader>, ConfigurationError> {
        let category = self.classify(container_type);
        let pair = category.schema_pair(container_type, writer, reader)?;
        let key = (container_type.clone(), pair);

        if let Some(cached) = self.readers.get(&key) {
            trace!(type_name = container_type.name(), "container reader cache hit");
            return Ok(cached.clone());
        }

        let built = Arc::new(ContainerReader {
            kind: category.kind(),
            container_type: container_type.clone(),
            datum_reader: self.datum_reader(&key.1.codec_key()),
        });
        debug!(
            type_name = container_type.name(),
            kind = %category.kind(),
            writer = built.writer_schema().full_name(),
            reader = built.reader_schema().full_name(),
            "created container reader"
        );
        Ok(self.readers.entry(key).or_insert(built).clone())
    }

    fn datum_reader(&self, key: &CodecKey) -> Arc<DatumReader> {
        if let Some(reader) = self.datum_readers.get(key) {
            return reader.clone();
        }
        let built = Arc::new(DatumReader::from_key(key));
        self.datum_readers
            .entry(key.clone())
            .or_insert(built)
            .clone()
    }

    pub fn writer_count(&self) -> usize {
        self.writers.len()
    }

    /// Number of distinct (container type, schema pair) readers.
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }
}
