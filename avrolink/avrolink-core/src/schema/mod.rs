//! Schema handles and reader/writer schema pairs.

mod kind;
mod pair;
mod types;

pub use kind::SchemaKind;
pub use pair::{CodecKey, SchemaPair};
pub use types::Schema;
