use std::{any::Any, sync::Arc};

use avrolink_core::{ConfigurationError, Metadata, metadata::project_container};
use avrolink_io::{BinaryEncoder, EncoderFactory, encode};
use bytes::Bytes;
use tracing::trace;

use crate::{
    catalog::TypeCatalog, codec_cache::CodecCache, error::AvroError, registry::SchemaRegistry,
};

/// Encoded bytes plus the metadata to send alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub bytes: Bytes,
    pub metadata: Metadata,
}

/// Encodes registered container values to Avro binary.
///
/// The writer schema is the instance's own schema for generic containers and
/// the registry schema otherwise. Schema metadata is added to the outgoing
/// metadata only where the caller has not set the same key.
#[derive(Debug, Clone)]
pub struct PayloadEncoder {
    registry: Arc<SchemaRegistry>,
    cache: Arc<CodecCache>,
    catalog: Arc<TypeCatalog>,
    factory: EncoderFactory,
}

/// Builder for [`PayloadEncoder`]. Unset collaborators default to the
/// process-wide instances.
#[derive(Debug, Default)]
pub struct PayloadEncoderBuilder {
    registry: Option<Arc<SchemaRegistry>>,
    cache: Option<Arc<CodecCache>>,
    catalog: Option<Arc<TypeCatalog>>,
    factory: Option<EncoderFactory>,
}

impl PayloadEncoder {
    pub fn builder() -> PayloadEncoderBuilder {
        PayloadEncoderBuilder::default()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<CodecCache> {
        &self.cache
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    pub fn binary_encoder(&self) -> BinaryEncoder {
        self.factory.binary_encoder()
    }

    pub fn encode(&self, payload: &dyn Any, metadata: &Metadata) -> Result<EncodedPayload, AvroError> {
        let mut encoder = self.factory.binary_encoder();
        self.encode_with(payload, metadata, &mut encoder)
    }

    /// [`encode`](Self::encode) through a caller-owned, reusable encoder.
    pub fn encode_with(
        &self,
        payload: &dyn Any,
        metadata: &Metadata,
        encoder: &mut BinaryEncoder,
    ) -> Result<EncodedPayload, AvroError> {
        let container_type = self.catalog.for_instance(payload).ok_or_else(|| {
            ConfigurationError::UnregisteredPayload {
                type_id: payload.type_id(),
            }
        })?;
        let schema = container_type
            .instance_schema(payload)
            .or_else(|| self.registry.resolve(&container_type))
            .ok_or_else(|| ConfigurationError::NoSchema {
                type_name: container_type.name().to_string(),
            })?;

        let writer = self.cache.writer_codec(&schema);
        let datum = container_type.to_datum(payload)?;
        let bytes = encode(datum, &writer, encoder)?;
        trace!(
            type_name = container_type.name(),
            schema = schema.full_name(),
            len = bytes.len(),
            "encoded payload"
        );

        let mut metadata = metadata.clone();
        metadata.extend_if_absent(project_container(&container_type, &schema));
        Ok(EncodedPayload { bytes, metadata })
    }
}

impl Default for PayloadEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadEncoderBuilder {
    /// Registry used for schema lookup. Also backs a fresh codec cache unless
    /// [`with_cache`](Self::with_cache) is set.
    pub fn with_registry(mut self, registry: Arc<SchemaRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Codec cache. Its registry is used unless
    /// [`with_registry`](Self::with_registry) is set, in which case a cache
    /// over a different registry is replaced.
    pub fn with_cache(mut self, cache: Arc<CodecCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Encoder factory; frozen on [`build`](Self::build).
    pub fn with_factory(mut self, factory: EncoderFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn build(self) -> PayloadEncoder {
        let (registry, cache) = CodecCache::pair_with_registry(self.registry, self.cache);
        PayloadEncoder {
            registry,
            cache,
            catalog: self.catalog.unwrap_or_else(TypeCatalog::global),
            factory: self.factory.unwrap_or(EncoderFactory::DEFAULT).freeze(),
        }
    }
}
