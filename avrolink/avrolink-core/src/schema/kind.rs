use std::fmt;

/// Schema kinds defined by the Avro specification.
/// <https://avro.apache.org/docs/current/specification/>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// `record`
    Record,
    /// `enum`
    Enum,
    /// `fixed`
    Fixed,
    /// `array`
    Array,
    /// `map`
    Map,
    /// `union`
    Union,
    /// `null`
    Null,
    /// `boolean`
    Boolean,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `bytes`
    Bytes,
    /// `string`
    String,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Enum => "enum",
            Self::Fixed => "fixed",
            Self::Array => "array",
            Self::Map => "map",
            Self::Union => "union",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
        }
    }

    /// Returns `true` for the kinds that carry a name and a namespace.
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Record | Self::Enum | Self::Fixed)
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            Self::Record | Self::Enum | Self::Fixed | Self::Array | Self::Map | Self::Union
        )
    }

    /// Parse a kind name as it appears in a schema's `type` attribute.
    pub fn from_type_name(s: &str) -> Option<Self> {
        let kind = match s {
            "record" => Self::Record,
            "enum" => Self::Enum,
            "fixed" => Self::Fixed,
            "array" => Self::Array,
            "map" => Self::Map,
            "union" => Self::Union,
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "bytes" => Self::Bytes,
            "string" => Self::String,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
