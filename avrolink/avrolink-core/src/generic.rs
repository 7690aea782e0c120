//! Dynamically-typed container carrying its own schema.

use apache_avro::types::Value;

use crate::schema::Schema;

/// A datum together with the schema it conforms to.
///
/// Unlike specific and reflective containers, the schema travels with each
/// instance rather than being bound to the Rust type.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericRecord {
    schema: Schema,
    datum: Value,
}

impl GenericRecord {
    /// Name the generic container travels under in payload metadata.
    pub const TYPE_NAME: &'static str = "avrolink.GenericRecord";

    /// Wrap `datum` without checking it against `schema`.
    pub fn new(schema: Schema, datum: Value) -> Self {
        Self { schema, datum }
    }

    /// Wrap `datum` if it conforms to `schema`.
    pub fn try_new(schema: Schema, datum: Value) -> Option<Self> {
        datum
            .validate(schema.as_avro())
            .then(|| Self::new(schema, datum))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn datum(&self) -> &Value {
        &self.datum
    }

    pub fn into_datum(self) -> Value {
        self.datum
    }

    /// Look up a record field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match &self.datum {
            Value::Record(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}
