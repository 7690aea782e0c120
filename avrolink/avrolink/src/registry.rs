use std::sync::{Arc, OnceLock};

use avrolink_core::{ContainerType, Schema};
use dashmap::DashMap;
use tracing::debug;

/// Memoizes the schema statically associated with each container type.
///
/// Lookups consult the type's [`SchemaProvider`](avrolink_core::SchemaProvider)
/// at most once; both hits and misses are remembered for the life of the
/// registry. Explicit [`register`](Self::register) calls replace whatever was
/// cached.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: DashMap<ContainerType, Option<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Schema of `container_type`, or `None` if none can be discovered.
    pub fn resolve(&self, container_type: &ContainerType) -> Option<Schema> {
        if let Some(cached) = self.schemas.get(container_type) {
            return cached.clone();
        }

        let discovered = container_type
            .schema_provider()
            .and_then(|provider| provider.provide());
        if discovered.is_none() {
            debug!(
                type_name = container_type.name(),
                kind = %container_type.kind(),
                "no schema discoverable for container type"
            );
        }
        self.schemas
            .entry(container_type.clone())
            .or_insert(discovered)
            .clone()
    }

    /// Associate `schema` with `container_type`, returning the previously
    /// cached schema.
    pub fn register(&self, container_type: ContainerType, schema: Schema) -> Option<Schema> {
        debug!(
            type_name = container_type.name(),
            schema = schema.full_name(),
            "registering schema"
        );
        self.schemas.insert(container_type, Some(schema)).flatten()
    }

    /// Number of container types with a cached lookup result.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
