use std::{
    any::{Any, TypeId},
    sync::{Arc, OnceLock},
};

use avrolink_core::{ContainerType, SpecificRecord};
use dashmap::DashMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// Loads a container type by its fully qualified name.
pub trait TypeLoader: Send + Sync {
    fn load(&self, type_name: &str) -> Option<ContainerType>;
}

/// Registry of the container types known to an encoder/decoder pair.
///
/// Types are found by name on decode and by Rust type on encode. The generic
/// container is always registered.
#[derive(Debug)]
pub struct TypeCatalog {
    by_name: DashMap<String, ContainerType>,
    by_type_id: DashMap<TypeId, ContainerType>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        let catalog = Self {
            by_name: DashMap::new(),
            by_type_id: DashMap::new(),
        };
        catalog.register(ContainerType::generic());
        catalog
    }

    /// The process-wide catalog.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<TypeCatalog>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Register `container_type` under its name and Rust type, replacing any
    /// earlier registration of either.
    pub fn register(&self, container_type: ContainerType) -> ContainerType {
        debug!(
            type_name = container_type.name(),
            kind = %container_type.kind(),
            "registering container type"
        );
        self.by_type_id
            .insert(container_type.type_id(), container_type.clone());
        self.by_name
            .insert(container_type.name().to_string(), container_type.clone());
        container_type
    }

    pub fn register_specific<T: SpecificRecord>(&self) -> ContainerType {
        self.register(ContainerType::specific::<T>())
    }

    pub fn register_reflective<T>(&self, type_name: impl Into<String>) -> ContainerType
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        self.register(ContainerType::reflective::<T>(type_name))
    }

    pub fn by_name(&self, type_name: &str) -> Option<ContainerType> {
        self.by_name.get(type_name).map(|entry| entry.clone())
    }

    /// Container type of a payload value.
    pub fn for_instance(&self, instance: &dyn Any) -> Option<ContainerType> {
        self.by_type_id
            .get(&instance.type_id())
            .map(|entry| entry.clone())
    }

    pub fn for_type<T: Any>(&self) -> Option<ContainerType> {
        self.by_type_id
            .get(&TypeId::of::<T>())
            .map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeLoader for TypeCatalog {
    fn load(&self, type_name: &str) -> Option<ContainerType> {
        self.by_name(type_name)
    }
}
