use avrolink_core::{CodecError, Schema, Value};
use avrolink_io::{DatumReader, DatumWriter, DecoderFactory, EncoderFactory, decode, encode};

const POINT_V1: &str = r#"{
    "type": "record",
    "name": "Point",
    "namespace": "geo",
    "fields": [
        {"name": "x", "type": "long"},
        {"name": "y", "type": "long"}
    ]
}"#;

const POINT_V2: &str = r#"{
    "type": "record",
    "name": "Point",
    "namespace": "geo",
    "fields": [
        {"name": "x", "type": "long"},
        {"name": "y", "type": "long"},
        {"name": "label", "type": "string", "default": "origin"}
    ]
}"#;

fn point(x: i64, y: i64) -> Value {
    Value::Record(vec![
        ("x".to_string(), Value::Long(x)),
        ("y".to_string(), Value::Long(y)),
    ])
}

#[test]
fn round_trip_with_same_schema() {
    let schema = Schema::parse(POINT_V1).unwrap();
    let writer = DatumWriter::new(schema.clone());
    let reader = DatumReader::new(schema.clone(), schema);
    let mut encoder = EncoderFactory::DEFAULT.binary_encoder();
    let mut decoder = DecoderFactory::DEFAULT.binary_decoder();

    let bytes = encode(point(3, -4), &writer, &mut encoder).unwrap();
    // zig-zag varints: 3 -> 0x06, -4 -> 0x07
    assert_eq!(&bytes[..], &[0x06, 0x07]);
    assert_eq!(encoder.pending(), 0);

    let datum = decode(&bytes, &reader, &mut decoder).unwrap();
    assert_eq!(datum, point(3, -4));
}

#[test]
fn primitive_round_trip() {
    let schema = Schema::parse(r#""string""#).unwrap();
    let writer = DatumWriter::new(schema.clone());
    let reader = DatumReader::new(schema.clone(), schema);
    let mut encoder = EncoderFactory::DEFAULT.binary_encoder();
    let mut decoder = DecoderFactory::DEFAULT.binary_decoder();

    let bytes = encode(Value::String("hi".to_string()), &writer, &mut encoder).unwrap();
    assert_eq!(&bytes[..], &[0x04, b'h', b'i']);
    assert_eq!(
        decode(&bytes, &reader, &mut decoder).unwrap(),
        Value::String("hi".to_string())
    );
}

#[test]
fn older_writer_data_is_filled_with_reader_defaults() {
    let v1 = Schema::parse(POINT_V1).unwrap();
    let v2 = Schema::parse(POINT_V2).unwrap();
    let mut encoder = EncoderFactory::DEFAULT.binary_encoder();
    let mut decoder = DecoderFactory::DEFAULT.binary_decoder();

    let bytes = encode(point(1, 2), &DatumWriter::new(v1.clone()), &mut encoder).unwrap();
    let datum = decode(&bytes, &DatumReader::new(v1, v2), &mut decoder).unwrap();

    assert_eq!(
        datum,
        Value::Record(vec![
            ("x".to_string(), Value::Long(1)),
            ("y".to_string(), Value::Long(2)),
            ("label".to_string(), Value::String("origin".to_string())),
        ])
    );
}

#[test]
fn encoder_and_decoder_are_reusable() {
    let schema = Schema::parse(POINT_V1).unwrap();
    let writer = DatumWriter::new(schema.clone());
    let reader = DatumReader::new(schema.clone(), schema);
    let mut encoder = EncoderFactory::DEFAULT.binary_encoder();
    let mut decoder = DecoderFactory::immutable(64).binary_decoder();

    for i in 0..100 {
        let bytes = encode(point(i, i * 2), &writer, &mut encoder).unwrap();
        let datum = decode(&bytes, &reader, &mut decoder).unwrap();
        assert_eq!(datum, point(i, i * 2));
        assert_eq!(decoder.input(), &bytes[..]);
    }
}

#[test]
fn nonconforming_datum_fails_to_encode() {
    let schema = Schema::parse(POINT_V1).unwrap();
    let mut encoder = EncoderFactory::DEFAULT.binary_encoder();

    let err = encode(
        Value::String("not a point".to_string()),
        &DatumWriter::new(schema),
        &mut encoder,
    )
    .unwrap_err();

    assert!(matches!(err, CodecError::Encode { ref schema_name, .. } if schema_name == "geo.Point"));
    assert_eq!(encoder.pending(), 0);
}

#[test]
fn truncated_input_fails_to_decode() {
    let schema = Schema::parse(POINT_V1).unwrap();
    let reader = DatumReader::new(schema.clone(), schema);
    let mut decoder = DecoderFactory::DEFAULT.binary_decoder();

    let err = decode(&[0x06], &reader, &mut decoder).unwrap_err();
    assert!(matches!(err, CodecError::Decode { .. }));
}

#[test]
fn incompatible_reader_fails_to_decode() {
    let writer = Schema::parse(POINT_V1).unwrap();
    let reader = Schema::parse(
        r#"{"type":"record","name":"Point","namespace":"geo","fields":[{"name":"z","type":"long"}]}"#,
    )
    .unwrap();
    let mut encoder = EncoderFactory::DEFAULT.binary_encoder();
    let mut decoder = DecoderFactory::DEFAULT.binary_decoder();

    let bytes = encode(point(1, 2), &DatumWriter::new(writer.clone()), &mut encoder).unwrap();
    let err = decode(&bytes, &DatumReader::new(writer, reader), &mut decoder).unwrap_err();
    assert!(matches!(err, CodecError::Decode { .. }));
}
