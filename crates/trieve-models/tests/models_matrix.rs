use std::sync::Arc;

use model_codec::{
    make_instance, record_to_json_schema, CodecError, FieldInput, ModelCodec, Random,
    SchemaMismatchError, ValidationError,
};
use serde_json::json;
use trieve_models::{
    all, chunk_filter, create_message_req_payload, field_condition, search_query_rating,
};

fn payload_codec() -> ModelCodec {
    ModelCodec::new(Arc::clone(create_message_req_payload()))
}

#[test]
fn every_model_builds_once_matrix() {
    let models = all();
    assert_eq!(models.len(), 9);
    for schema in &models {
        assert!(!schema.is_empty(), "{} has no fields", schema.name());
    }
    assert!(Arc::ptr_eq(all()[7], create_message_req_payload()));
}

#[test]
fn create_message_payload_matrix() {
    let c = payload_codec();
    let wire = json!({
        "topic_id": "3c90c3cc",
        "new_message_content": "How do I rotate an API key?",
        "page_size": 10,
        "score_threshold": 0.25,
        "search_type": "hybrid",
        "filters": {
            "must": [{"field": "tag_set", "match_all": ["docs"]}],
            "must_not": null
        },
        "llm_options": {"temperature": 0.5, "stream_response": false},
        "sort_options": {"tag_weights": {"docs": 1.5}}
    });
    let r = c.deserialize(&wire).unwrap().unwrap();
    assert!(!r.is_null("filters"));
    let filters = r.get("filters").and_then(|v| v.as_record()).unwrap();
    assert!(filters.is_null("must_not"));
    assert!(!filters.is_explicit("should"));

    // Output follows declaration order, not input order.
    let out = c.serialize(&r).unwrap();
    let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        [
            "filters",
            "llm_options",
            "new_message_content",
            "page_size",
            "score_threshold",
            "search_type",
            "sort_options",
            "topic_id"
        ]
    );
    assert_eq!(out, wire);
}

#[test]
fn create_message_payload_rejections_matrix() {
    let c = payload_codec();

    let err = c.deserialize(&json!({"page_size": 10})).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Validation(ValidationError::MissingField { ref field, .. }) if field == "topic_id"
    ));

    let err = c
        .deserialize(&json!({"topic_id": "t", "page_size": -3}))
        .unwrap_err();
    assert!(err.is_constraint());

    let err = c
        .deserialize(&json!({"topic_id": "t", "search_type": "keyword"}))
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::SchemaMismatch(SchemaMismatchError::Type { .. })
    ));

    let err = c
        .deserialize(&json!({"topic_id": "t", "filters": {"must": [{"match_any": [1]}]}}))
        .unwrap_err();
    assert_eq!(err.path().to_pointer(), "/filters/must/0/field");
}

#[test]
fn explicit_null_for_every_optional_field_matrix() {
    let c = payload_codec();
    let schema = c.schema();
    let mut fields = vec![("topic_id".to_string(), FieldInput::from("t1"))];
    for f in schema.fields().iter().filter(|f| !f.required) {
        fields.push((f.name.clone(), FieldInput::Null));
    }
    let r = c.validate_construct(fields).unwrap();
    let out = c.serialize(&r).unwrap();
    assert_eq!(out.as_object().unwrap().len(), 18);
    assert_eq!(out["page_size"], json!(null));
    assert_eq!(out["topic_id"], json!("t1"));
}

#[test]
fn filter_built_from_prebuilt_conditions_matrix() {
    let cond = ModelCodec::new(Arc::clone(field_condition()))
        .validate_construct([
            ("field", FieldInput::from("num_value")),
            ("range", FieldInput::from(json!({"gte": 1, "lt": 9.5}))),
        ])
        .unwrap();
    let filter_codec = ModelCodec::new(Arc::clone(chunk_filter()));
    let filter = filter_codec
        .validate_construct([("should", FieldInput::from(vec![cond]))])
        .unwrap();
    let c = payload_codec();
    let r = c
        .validate_construct([
            ("topic_id", FieldInput::from("t1")),
            ("filters", FieldInput::from(filter)),
        ])
        .unwrap();
    assert_eq!(
        c.serialize(&r).unwrap(),
        json!({
            "filters": {"should": [{"field": "num_value", "range": {"gte": 1, "lt": 9.5}}]},
            "topic_id": "t1"
        })
    );
}

#[test]
fn search_query_rating_matrix() {
    let schema = search_query_rating();
    let c = ModelCodec::new(Arc::clone(schema));

    let r = make_instance(schema, true).unwrap();
    assert_eq!(c.serialize(&r).unwrap(), json!({"note": "", "rating": 56}));
    let r = make_instance(schema, false).unwrap();
    assert_eq!(c.serialize(&r).unwrap(), json!({"rating": 56}));

    let r = c.deserialize(&json!({"note": null, "rating": 3})).unwrap().unwrap();
    assert!(r.is_null("note"));
    assert!(c.deserialize(&json!({"rating": 3.5})).is_err());
}

#[test]
fn random_payloads_round_trip_matrix() {
    let mut random = Random::seeded(2024);
    for schema in all() {
        let c = ModelCodec::new(Arc::clone(schema));
        for _ in 0..25 {
            let r = random.instance(schema).unwrap();
            let wire = c.serialize(&r).unwrap();
            assert_eq!(c.deserialize(&wire).unwrap(), Some(r), "{}", schema.name());
        }
    }
}

#[test]
fn json_schema_export_matrix() {
    let js = record_to_json_schema(create_message_req_payload());
    assert_eq!(js["title"], json!("CreateMessageReqPayload"));
    assert_eq!(js["required"], json!(["topic_id"]));
    assert_eq!(
        js["properties"]["search_type"]["anyOf"][0]["enum"],
        json!(["fulltext", "semantic", "hybrid", "bm25"])
    );
    assert_eq!(
        js["properties"]["filters"]["anyOf"][0]["$ref"],
        json!("#/$defs/ChunkFilter")
    );
    let defs = js["$defs"].as_object().unwrap();
    for name in [
        "ContextOptions",
        "ChunkFilter",
        "FieldCondition",
        "Range",
        "HighlightOptions",
        "LLMOptions",
        "SortOptions",
    ] {
        assert!(defs.contains_key(name), "missing {name}");
    }
    assert_eq!(defs.len(), 7);
}
