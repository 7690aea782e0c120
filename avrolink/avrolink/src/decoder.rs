use std::{
    any::{Any, type_name},
    fmt,
    sync::Arc,
};

use avrolink_core::{CodecError, ContainerType, Metadata, Schema, SchemaPair};
use avrolink_io::{BinaryDecoder, DecoderFactory};
use tracing::debug;

use crate::{
    catalog::TypeCatalog,
    codec_cache::{CodecCache, ContainerReader},
    error::AvroError,
    registry::SchemaRegistry,
    type_resolver::{TypeExpression, TypeHint, TypeResolver},
};

/// Derives the schema pair for a decode from the target type and metadata.
pub type SchemaStrategy = Arc<dyn Fn(&ContainerType, &Metadata) -> Option<SchemaPair> + Send + Sync>;

/// A decoded instance together with its container type.
pub struct DecodedPayload {
    container_type: ContainerType,
    value: Box<dyn Any + Send>,
}

impl DecodedPayload {
    pub fn container_type(&self) -> &ContainerType {
        &self.container_type
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn downcast<T: Any>(self) -> Result<T, CodecError> {
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| CodecError::TypeMismatch {
                expected: type_name::<T>().to_string(),
            })
    }

    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.value
    }
}

impl fmt::Debug for DecodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedPayload")
            .field("container_type", &self.container_type)
            .finish_non_exhaustive()
    }
}

/// Decodes Avro binary into the container type named by the metadata.
///
/// Schemas for a decode come from, in order of precedence: the explicitly
/// configured reader/writer schemas, the [`SchemaStrategy`] (by default the
/// registry schema of the target type as writer schema), and finally the
/// target type's own default reader schema.
#[derive(Clone)]
pub struct PayloadDecoder {
    cache: Arc<CodecCache>,
    resolver: TypeResolver,
    schema_strategy: SchemaStrategy,
    explicit: Option<SchemaPair>,
    factory: DecoderFactory,
}

/// Builder for [`PayloadDecoder`]. Unset collaborators default to the
/// process-wide instances.
#[derive(Default)]
pub struct PayloadDecoderBuilder {
    registry: Option<Arc<SchemaRegistry>>,
    cache: Option<Arc<CodecCache>>,
    catalog: Option<Arc<TypeCatalog>>,
    factory: Option<DecoderFactory>,
    default_type: Option<ContainerType>,
    type_expression: Option<TypeExpression>,
    schema_strategy: Option<SchemaStrategy>,
    reader_schema: Option<Schema>,
    writer_schema: Option<Schema>,
}

impl PayloadDecoder {
    pub fn builder() -> PayloadDecoderBuilder {
        PayloadDecoderBuilder::default()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn cache(&self) -> &Arc<CodecCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    pub fn binary_decoder(&self) -> BinaryDecoder {
        self.factory.binary_decoder()
    }

    pub fn decode(&self, bytes: &[u8], metadata: &Metadata) -> Result<DecodedPayload, AvroError> {
        let mut decoder = self.factory.binary_decoder();
        self.decode_with(bytes, metadata, &mut decoder, None)
    }

    /// [`decode`](Self::decode) through a caller-owned decoder.
    ///
    /// When `reuse` holds a value of the target type it is overwritten in
    /// place and returned; otherwise a new instance is created.
    pub fn decode_with(
        &self,
        bytes: &[u8],
        metadata: &Metadata,
        decoder: &mut BinaryDecoder,
        reuse: Option<Box<dyn Any + Send>>,
    ) -> Result<DecodedPayload, AvroError> {
        let reader = self.container_reader(metadata)?;
        let container_type = reader.container_type().clone();

        let value = match reuse {
            Some(mut instance) if container_type.is_instance(&*instance) => {
                reader.read_into(bytes, decoder, &mut *instance)?;
                instance
            }
            _ => reader.read(bytes, decoder)?,
        };
        Ok(DecodedPayload {
            container_type,
            value,
        })
    }

    /// Reader codec a decode of `metadata` would use.
    pub fn container_reader(&self, metadata: &Metadata) -> Result<Arc<ContainerReader>, AvroError> {
        let container_type = self.resolver.resolve(metadata)?;
        let derived = (self.schema_strategy)(&container_type, metadata);
        let pair = match (&self.explicit, derived) {
            (Some(explicit), Some(derived)) => Some(explicit.clone().with_fallback(&derived)),
            (Some(explicit), None) => Some(explicit.clone()),
            (None, derived) => derived,
        };
        debug!(
            type_name = container_type.name(),
            writer = pair.as_ref().and_then(SchemaPair::writer).map(Schema::full_name),
            reader = pair.as_ref().and_then(SchemaPair::reader).map(Schema::full_name),
            "resolved decode target"
        );

        let reader = self.cache.reader_codec(
            &container_type,
            pair.as_ref().and_then(SchemaPair::writer),
            pair.as_ref().and_then(SchemaPair::reader),
        )?;
        Ok(reader)
    }
}

impl Default for PayloadDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PayloadDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadDecoder")
            .field("resolver", &self.resolver)
            .field("explicit", &self.explicit)
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

/// Writer-only pair holding the registry schema of the target type.
pub fn registry_writer_schema(registry: Arc<SchemaRegistry>) -> SchemaStrategy {
    Arc::new(move |container_type: &ContainerType, _metadata: &Metadata| {
        registry
            .resolve(container_type)
            .map(SchemaPair::writer_only)
    })
}

impl PayloadDecoderBuilder {
    /// Registry used by the default schema strategy. Also backs a fresh
    /// codec cache unless [`with_cache`](Self::with_cache) is set.
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

    /// Catalog that type names in metadata are loaded from.
    pub fn with_catalog(mut self, catalog: Arc<TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Decoder factory; frozen on [`build`](Self::build).
    pub fn with_factory(mut self, factory: DecoderFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Type decoded into when the metadata names none.
    pub fn with_default_type(mut self, default_type: ContainerType) -> Self {
        self.default_type = Some(default_type);
        self
    }

    /// Replace the default `avro_payload_fqcn` lookup.
    pub fn with_type_expression<F>(mut self, expression: F) -> Self
    where
        F: Fn(&Metadata) -> TypeHint + Send + Sync + 'static,
    {
        self.type_expression = Some(Arc::new(expression));
        self
    }

    /// Replace the default [`registry_writer_schema`] strategy.
    pub fn with_schema_strategy<F>(mut self, strategy: F) -> Self
    where
        F: Fn(&ContainerType, &Metadata) -> Option<SchemaPair> + Send + Sync + 'static,
    {
        self.schema_strategy = Some(Arc::new(strategy));
        self
    }

    pub fn with_reader_schema(mut self, schema: Schema) -> Self {
        self.reader_schema = Some(schema);
        self
    }

    pub fn with_writer_schema(mut self, schema: Schema) -> Self {
        self.writer_schema = Some(schema);
        self
    }

    pub fn build(self) -> PayloadDecoder {
        let (registry, cache) = CodecCache::pair_with_registry(self.registry, self.cache);

        let catalog = self.catalog.unwrap_or_else(TypeCatalog::global);
        let mut resolver = TypeResolver::new(catalog);
        if let Some(expression) = self.type_expression {
            resolver = resolver.with_expression(move |metadata| expression(metadata));
        }
        if let Some(default_type) = self.default_type {
            resolver = resolver.with_default_type(default_type);
        }

        PayloadDecoder {
            cache,
            resolver,
            schema_strategy: self
                .schema_strategy
                .unwrap_or_else(|| registry_writer_schema(registry)),
            explicit: SchemaPair::of(self.reader_schema, self.writer_schema).ok(),
            factory: self.factory.unwrap_or(DecoderFactory::DEFAULT).freeze(),
        }
    }
}
