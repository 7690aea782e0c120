use avrolink_core::{
    ContainerType, GenericRecord, Metadata, MetadataValue, Schema,
    metadata::{
        MIME_AVRO, MIME_AVRO_BINARY, PAYLOAD_FQCN, SCHEMA_FULL_NAME, SCHEMA_NAME,
        SCHEMA_NAMESPACE, SCHEMA_TYPE_NAME, project, project_container,
    },
};

fn projected(json: &str) -> Metadata {
    project(&Schema::parse(json).unwrap())
}

#[test]
fn record_projection_includes_namespace() {
    let metadata = projected(
        r#"{"type":"record","name":"Trade","namespace":"com.example","fields":[{"name":"id","type":"long"}]}"#,
    );
    assert_eq!(metadata.len(), 4);
    assert_eq!(metadata.get_text(SCHEMA_NAME), Some("Trade"));
    assert_eq!(metadata.get_text(SCHEMA_FULL_NAME), Some("com.example.Trade"));
    assert_eq!(metadata.get_text(SCHEMA_TYPE_NAME), Some("record"));
    assert_eq!(metadata.get_text(SCHEMA_NAMESPACE), Some("com.example"));
}

#[test]
fn enum_and_fixed_projections_include_namespace() {
    let suit = projected(r#"{"type":"enum","name":"Suit","namespace":"cards","symbols":["SPADES"]}"#);
    assert_eq!(suit.get_text(SCHEMA_TYPE_NAME), Some("enum"));
    assert_eq!(suit.get_text(SCHEMA_NAMESPACE), Some("cards"));

    let md5 = projected(r#"{"type":"fixed","name":"Md5","namespace":"hash","size":16}"#);
    assert_eq!(md5.get_text(SCHEMA_TYPE_NAME), Some("fixed"));
    assert_eq!(md5.get_text(SCHEMA_FULL_NAME), Some("hash.Md5"));
    assert_eq!(md5.get_text(SCHEMA_NAMESPACE), Some("hash"));
}

#[test]
fn decimal_over_fixed_projects_the_fixed_name() {
    let metadata = projected(
        r#"{"type":{"type":"fixed","name":"Dec","namespace":"money","size":8},"logicalType":"decimal","precision":10,"scale":2}"#,
    );
    assert_eq!(metadata.get_text(SCHEMA_TYPE_NAME), Some("fixed"));
    assert_eq!(metadata.get_text(SCHEMA_NAME), Some("Dec"));
    assert_eq!(metadata.get_text(SCHEMA_NAMESPACE), Some("money"));
    assert_eq!(metadata.get_text(SCHEMA_FULL_NAME), Some("money.Dec"));
}

#[test]
fn named_schema_without_namespace_projects_empty_namespace() {
    let metadata = projected(r#"{"type":"record","name":"Bare","fields":[]}"#);
    assert_eq!(metadata.get_text(SCHEMA_FULL_NAME), Some("Bare"));
    assert_eq!(metadata.get_text(SCHEMA_NAMESPACE), Some(""));
}

#[test]
fn unnamed_projections_omit_namespace() {
    for (json, kind) in [
        (r#""string""#, "string"),
        (r#""long""#, "long"),
        (r#"{"type":"array","items":"int"}"#, "array"),
        (r#"{"type":"map","values":"double"}"#, "map"),
        (r#"["null","string"]"#, "union"),
    ] {
        let metadata = projected(json);
        assert_eq!(metadata.len(), 3, "{json}");
        assert_eq!(metadata.get_text(SCHEMA_TYPE_NAME), Some(kind));
        assert_eq!(metadata.get_text(SCHEMA_NAME), Some(kind));
        assert!(!metadata.contains_key(SCHEMA_NAMESPACE), "{json}");
    }
}

#[test]
fn container_projection_adds_payload_type_name() {
    let schema = Schema::parse(r#""string""#).unwrap();
    let container_type = ContainerType::generic();
    let metadata = project_container(&container_type, &schema);

    assert_eq!(metadata.get_text(PAYLOAD_FQCN), Some(container_type.name()));
    assert_eq!(container_type.name(), "avrolink.GenericRecord");
    assert_eq!(container_type.name(), GenericRecord::TYPE_NAME);
    assert_eq!(metadata.get_text(SCHEMA_TYPE_NAME), Some("string"));
}

#[test]
fn extend_if_absent_keeps_existing_entries() {
    let mut metadata = Metadata::new()
        .with(SCHEMA_NAME, "Custom")
        .with("trace_id", "abc");
    let projected = projected(r#"{"type":"record","name":"Trade","fields":[]}"#);

    metadata.extend_if_absent(projected);

    assert_eq!(metadata.get_text(SCHEMA_NAME), Some("Custom"));
    assert_eq!(metadata.get_text(SCHEMA_FULL_NAME), Some("Trade"));
    assert_eq!(metadata.get_text("trace_id"), Some("abc"));
    assert_eq!(metadata.len(), 5);
}

#[test]
fn values_can_carry_types_or_text() {
    let container_type = ContainerType::generic();
    let metadata: Metadata = [
        ("by_type", MetadataValue::from(container_type.clone())),
        ("by_name", MetadataValue::from("com.example.Trade")),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        metadata.get("by_type").and_then(MetadataValue::as_type),
        Some(&container_type)
    );
    assert_eq!(metadata.get_text("by_type"), None);
    assert_eq!(metadata.get_text("by_name"), Some("com.example.Trade"));
    assert_eq!(
        metadata.get("by_name").and_then(MetadataValue::as_type),
        None
    );
}

#[test]
fn content_types_are_avro_mime_types() {
    assert_eq!(MIME_AVRO, "application/avro");
    assert_eq!(MIME_AVRO_BINARY, "avro/binary");
}
