use apache_avro::types::Value;
use avrolink_core::CodecError;
use bytes::Bytes;
use tracing::debug;

use crate::{
    binary::{BinaryDecoder, BinaryEncoder},
    datum::{DatumReader, DatumWriter},
};

/// Encode one datum and return its bytes.
///
/// `encoder` is left empty on return, including on failure.
pub fn encode(datum: Value, writer: &DatumWriter, encoder: &mut BinaryEncoder) -> Result<Bytes, CodecError> {
    if let Err(err) = writer.write(datum, encoder) {
        debug!(schema = writer.schema().full_name(), error = %err, "encode failed");
        encoder.flush();
        return Err(err);
    }
    Ok(encoder.flush())
}

/// Decode one datum from `bytes`, loading them into `decoder` first.
pub fn decode(bytes: &[u8], reader: &DatumReader, decoder: &mut BinaryDecoder) -> Result<Value, CodecError> {
    decoder.reset(bytes);
    reader.read(decoder).inspect_err(|err| {
        debug!(
            writer = reader.writer_schema().full_name(),
            reader = reader.reader_schema().full_name(),
            error = %err,
            "decode failed"
        );
    })
}
