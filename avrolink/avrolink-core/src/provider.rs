//! Static schema discovery strategies for specific container types.
//!
//! A specific type can expose its schema in two ways: a declared JSON
//! descriptor ([`SpecificRecord::SCHEMA`](crate::SpecificRecord::SCHEMA)) and
//! an accessor function
//! ([`SpecificRecord::class_schema`](crate::SpecificRecord::class_schema)).
//! Each is a [`SchemaProvider`]; [`SchemaProvider::or`] composes them so the
//! descriptor is tried first and the accessor second.

use tracing::debug;

use crate::schema::Schema;

/// Supplies the schema statically associated with a container type.
///
/// A provider that cannot produce a schema returns `None`; that is a normal
/// outcome, not an error.
pub trait SchemaProvider: Send + Sync {
    fn provide(&self) -> Option<Schema>;

    /// Try `self`, then `fallback`.
    fn or<P>(self, fallback: P) -> Fallback<Self, P>
    where
        Self: Sized,
        P: SchemaProvider,
    {
        Fallback {
            primary: self,
            fallback,
        }
    }
}

/// Parses the JSON schema descriptor declared on a type.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredSchema {
    type_name: &'static str,
    document: Option<&'static str>,
}

impl DeclaredSchema {
    pub fn new(type_name: &'static str, document: Option<&'static str>) -> Self {
        Self {
            type_name,
            document,
        }
    }
}

impl SchemaProvider for DeclaredSchema {
    fn provide(&self) -> Option<Schema> {
        let Some(document) = self.document else {
            debug!(type_name = self.type_name, "no declared schema descriptor");
            return None;
        };
        match Schema::parse(document) {
            Ok(schema) => Some(schema),
            Err(err) => {
                debug!(type_name = self.type_name, error = %err, "declared schema descriptor is not a valid schema");
                None
            }
        }
    }
}

/// Invokes the schema accessor function of a type.
#[derive(Debug, Clone, Copy)]
pub struct SchemaAccessor {
    type_name: &'static str,
    accessor: fn() -> Option<Schema>,
}

impl SchemaAccessor {
    pub fn new(type_name: &'static str, accessor: fn() -> Option<Schema>) -> Self {
        Self {
            type_name,
            accessor,
        }
    }
}

impl SchemaProvider for SchemaAccessor {
    fn provide(&self) -> Option<Schema> {
        let schema = (self.accessor)();
        if schema.is_none() {
            debug!(type_name = self.type_name, "schema accessor returned no schema");
        }
        schema
    }
}

/// Provider composition built by [`SchemaProvider::or`].
#[derive(Debug, Clone, Copy)]
pub struct Fallback<A, B> {
    primary: A,
    fallback: B,
}

impl<A: SchemaProvider, B: SchemaProvider> SchemaProvider for Fallback<A, B> {
    fn provide(&self) -> Option<Schema> {
        self.primary.provide().or_else(|| self.fallback.provide())
    }
}
