use apache_avro::types::Value;
use avrolink_core::{CodecError, CodecKey, Schema};
use tracing::trace;

use crate::binary::{BinaryDecoder, BinaryEncoder};

/// Writes datums conforming to one writer schema.
#[derive(Debug, Clone)]
pub struct DatumWriter {
    schema: Schema,
}

impl DatumWriter {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Resolve `datum` against the writer schema and append its binary form.
    ///
    /// Nothing is written when the datum does not fit the schema.
    pub fn write(&self, datum: Value, encoder: &mut BinaryEncoder) -> Result<(), CodecError> {
        let encode_err = |source| CodecError::Encode {
            schema_name: self.schema.full_name().to_string(),
            source,
        };
        let resolved = datum.resolve(self.schema.as_avro()).map_err(encode_err)?;
        let bytes = apache_avro::to_avro_datum(self.schema.as_avro(), resolved).map_err(encode_err)?;
        trace!(schema = self.schema.full_name(), len = bytes.len(), "encoded datum");
        encoder.write_bytes(&bytes);
        Ok(())
    }
}

/// Reads datums written with one schema and resolves them against another.
#[derive(Debug, Clone)]
pub struct DatumReader {
    writer: Schema,
    reader: Schema,
}

impl DatumReader {
    pub fn new(writer: Schema, reader: Schema) -> Self {
        Self { writer, reader }
    }

    pub fn from_key(key: &CodecKey) -> Self {
        Self::new(key.writer.clone(), key.reader.clone())
    }

    pub fn writer_schema(&self) -> &Schema {
        &self.writer
    }

    pub fn reader_schema(&self) -> &Schema {
        &self.reader
    }

    /// Read one datum from the input currently loaded into `decoder`.
    pub fn read(&self, decoder: &BinaryDecoder) -> Result<Value, CodecError> {
        let mut input = decoder.input();
        let datum = apache_avro::from_avro_datum(
            self.writer.as_avro(),
            &mut input,
            Some(self.reader.as_avro()),
        )
        .map_err(|source| CodecError::Decode {
            schema_name: self.reader.full_name().to_string(),
            source,
        })?;
        if !input.is_empty() {
            trace!(
                schema = self.reader.full_name(),
                trailing = input.len(),
                "ignoring trailing bytes after datum"
            );
        }
        Ok(datum)
    }
}
