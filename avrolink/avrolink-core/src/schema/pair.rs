use super::Schema;
use crate::error::ConfigurationError;

/// A reader/writer schema combination. At least one side is always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaPair {
    ReaderOnly(Schema),
    WriterOnly(Schema),
    Complete { reader: Schema, writer: Schema },
}

/// Effective writer/reader schemas of a [`SchemaPair`].
///
/// A missing side takes the value of the present one, so single-sided pairs
/// and complete pairs with identical schemas map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodecKey {
    pub writer: Schema,
    pub reader: Schema,
}

impl SchemaPair {
    pub fn of(reader: Option<Schema>, writer: Option<Schema>) -> Result<Self, ConfigurationError> {
        match (reader, writer) {
            (Some(reader), Some(writer)) => Ok(Self::Complete { reader, writer }),
            (Some(reader), None) => Ok(Self::ReaderOnly(reader)),
            (None, Some(writer)) => Ok(Self::WriterOnly(writer)),
            (None, None) => Err(ConfigurationError::MissingSchemas),
        }
    }

    pub fn reader_only(reader: Schema) -> Self {
        Self::ReaderOnly(reader)
    }

    pub fn writer_only(writer: Schema) -> Self {
        Self::WriterOnly(writer)
    }

    pub fn complete(reader: Schema, writer: Schema) -> Self {
        Self::Complete { reader, writer }
    }

    /// Take the reader side of `reader_side` and the writer side of
    /// `writer_side`. Degrades to a single-sided pair when only one is usable.
    pub fn combine(
        reader_side: Option<&SchemaPair>,
        writer_side: Option<&SchemaPair>,
    ) -> Result<Self, ConfigurationError> {
        Self::of(
            reader_side.and_then(SchemaPair::reader).cloned(),
            writer_side.and_then(SchemaPair::writer).cloned(),
        )
    }

    /// Fill whichever side is missing from `fallback`; present sides win.
    pub fn with_fallback(self, fallback: &SchemaPair) -> Self {
        match self {
            Self::Complete { .. } => self,
            Self::ReaderOnly(reader) => match fallback.writer() {
                Some(writer) => Self::complete(reader, writer.clone()),
                None => Self::ReaderOnly(reader),
            },
            Self::WriterOnly(writer) => match fallback.reader() {
                Some(reader) => Self::complete(reader.clone(), writer),
                None => Self::WriterOnly(writer),
            },
        }
    }

    pub fn reader(&self) -> Option<&Schema> {
        match self {
            Self::ReaderOnly(reader) | Self::Complete { reader, .. } => Some(reader),
            Self::WriterOnly(_) => None,
        }
    }

    pub fn writer(&self) -> Option<&Schema> {
        match self {
            Self::WriterOnly(writer) | Self::Complete { writer, .. } => Some(writer),
            Self::ReaderOnly(_) => None,
        }
    }

    pub fn has_reader(&self) -> bool {
        self.reader().is_some()
    }

    pub fn has_writer(&self) -> bool {
        self.writer().is_some()
    }

    pub fn codec_key(&self) -> CodecKey {
        let (writer, reader) = match self {
            Self::ReaderOnly(reader) => (reader, reader),
            Self::WriterOnly(writer) => (writer, writer),
            Self::Complete { reader, writer } => (writer, reader),
        };
        CodecKey {
            writer: writer.clone(),
            reader: reader.clone(),
        }
    }
}
