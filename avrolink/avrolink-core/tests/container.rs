use std::any::Any;

use avrolink_core::{
    CodecError, ContainerKind, ContainerType, DeclaredSchema, GenericRecord, Schema,
    SchemaAccessor, SchemaProvider, SpecificRecord, Value,
};
use serde::{Deserialize, Serialize};

const TRADE_SCHEMA: &str = r#"{"type":"record","name":"Trade","namespace":"com.example","fields":[{"name":"symbol","type":"string"},{"name":"quantity","type":"long"}]}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Trade {
    symbol: String,
    quantity: i64,
}

impl SpecificRecord for Trade {
    const TYPE_NAME: &'static str = "com.example.Trade";
    const SCHEMA: Option<&'static str> = Some(TRADE_SCHEMA);
}

/// Exposes its schema through the accessor only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Quote {
    symbol: String,
}

impl SpecificRecord for Quote {
    const TYPE_NAME: &'static str = "com.example.Quote";

    fn class_schema() -> Option<Schema> {
        Schema::parse(r#"{"type":"record","name":"Quote","namespace":"com.example","fields":[{"name":"symbol","type":"string"}]}"#).ok()
    }
}

/// Declares a broken descriptor but a working accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Broken {
    symbol: String,
}

impl SpecificRecord for Broken {
    const TYPE_NAME: &'static str = "com.example.Broken";
    const SCHEMA: Option<&'static str> = Some("{not a schema");

    fn class_schema() -> Option<Schema> {
        Schema::parse(r#"{"type":"record","name":"Broken","fields":[{"name":"symbol","type":"string"}]}"#).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Opaque {
    symbol: String,
}

impl SpecificRecord for Opaque {
    const TYPE_NAME: &'static str = "com.example.Opaque";
}

fn provided<T: SpecificRecord>() -> Option<Schema> {
    ContainerType::specific::<T>()
        .schema_provider()
        .and_then(|provider| provider.provide())
}

#[test]
fn declared_descriptor_wins() {
    let schema = provided::<Trade>().unwrap();
    assert_eq!(schema, Schema::parse(TRADE_SCHEMA).unwrap());
}

#[test]
fn accessor_is_used_without_descriptor() {
    assert_eq!(provided::<Quote>().unwrap().full_name(), "com.example.Quote");
}

#[test]
fn invalid_descriptor_falls_back_to_accessor() {
    assert_eq!(provided::<Broken>().unwrap().name(), "Broken");
}

#[test]
fn no_strategy_yields_no_schema() {
    assert_eq!(provided::<Opaque>(), None);
}

#[test]
fn providers_compose_in_order() {
    fn quote() -> Option<Schema> {
        Quote::class_schema()
    }
    fn none() -> Option<Schema> {
        None
    }

    let declared = DeclaredSchema::new("t", Some(TRADE_SCHEMA));
    assert_eq!(
        declared.or(SchemaAccessor::new("t", quote)).provide().unwrap().name(),
        "Trade"
    );
    assert_eq!(
        DeclaredSchema::new("t", None)
            .or(SchemaAccessor::new("t", quote))
            .provide()
            .unwrap()
            .name(),
        "Quote"
    );
    assert!(
        DeclaredSchema::new("t", None)
            .or(SchemaAccessor::new("t", none))
            .provide()
            .is_none()
    );
}

#[test]
fn container_kinds_and_identity() {
    let trade = ContainerType::specific::<Trade>();
    let reflective = ContainerType::reflective::<Trade>("com.example.TradeView");
    let generic = ContainerType::generic();

    assert_eq!(trade.kind(), ContainerKind::Specific);
    assert_eq!(reflective.kind(), ContainerKind::Reflective);
    assert_eq!(generic.kind(), ContainerKind::Generic);
    assert_eq!(trade.kind().to_string(), "specific");

    assert_eq!(trade, ContainerType::specific::<Trade>());
    assert_ne!(trade, reflective);
    assert_eq!(generic, ContainerType::generic());

    assert!(reflective.schema_provider().is_none());
    assert!(generic.schema_provider().is_none());
    assert_eq!(trade.to_string(), "com.example.Trade");
}

#[test]
fn specific_datum_round_trip() {
    let container_type = ContainerType::specific::<Trade>();
    let schema = Schema::parse(TRADE_SCHEMA).unwrap();
    let trade = Trade {
        symbol: "ACME".to_string(),
        quantity: 42,
    };

    assert!(container_type.is_instance(&trade));
    assert!(container_type.instance_schema(&trade).is_none());

    let datum = container_type.to_datum(&trade).unwrap();
    assert!(datum.clone().resolve(schema.as_avro()).is_ok());

    let decoded = container_type.from_datum(datum.clone(), &schema).unwrap();
    let decoded: Box<dyn Any> = decoded;
    assert_eq!(decoded.downcast_ref::<Trade>(), Some(&trade));

    let mut reused = Trade {
        symbol: String::new(),
        quantity: 0,
    };
    container_type
        .from_datum_into(datum, &schema, &mut reused)
        .unwrap();
    assert_eq!(reused, trade);
}

#[test]
fn wrong_instance_is_a_type_mismatch() {
    let container_type = ContainerType::specific::<Trade>();
    let quote = Quote {
        symbol: "ACME".to_string(),
    };

    assert!(!container_type.is_instance(&quote));
    assert!(matches!(
        container_type.to_datum(&quote),
        Err(CodecError::TypeMismatch { .. })
    ));
}

#[test]
fn generic_record_carries_its_schema() {
    let schema = Schema::parse(TRADE_SCHEMA).unwrap();
    let datum = Value::Record(vec![
        ("symbol".to_string(), Value::String("ACME".to_string())),
        ("quantity".to_string(), Value::Long(7)),
    ]);
    let record = GenericRecord::try_new(schema.clone(), datum.clone()).unwrap();
    let container_type = ContainerType::generic();

    assert_eq!(container_type.instance_schema(&record), Some(schema.clone()));
    assert_eq!(record.field("quantity"), Some(&Value::Long(7)));
    assert_eq!(record.field("missing"), None);
    assert_eq!(container_type.to_datum(&record).unwrap(), datum);

    let rebuilt = container_type.from_datum(datum, &schema).unwrap();
    let rebuilt: Box<dyn Any> = rebuilt;
    assert_eq!(rebuilt.downcast_ref::<GenericRecord>(), Some(&record));
}

#[test]
fn generic_record_rejects_nonconforming_datum() {
    let schema = Schema::parse(TRADE_SCHEMA).unwrap();
    let datum = Value::Record(vec![("symbol".to_string(), Value::Int(1))]);
    assert!(GenericRecord::try_new(schema, datum).is_none());
}
