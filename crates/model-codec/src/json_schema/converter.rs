//! Converts record schemas to JSON Schema.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::schema::{FieldSpec, FieldType, NumRange, RecordSchema, Walker};

/// Convert a record schema to a JSON Schema document.
///
/// Nested records become `$ref`s into a `$defs` table holding every record
/// schema reachable from the root.
pub fn record_to_json_schema(schema: &Arc<RecordSchema>) -> Value {
    let mut out = match object_schema(schema) {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    let mut defs = Map::new();
    Walker::walk(schema, &mut |nested| {
        if !Arc::ptr_eq(nested, schema) {
            defs.insert(nested.name().to_string(), object_schema(nested));
        }
    });
    if !defs.is_empty() {
        out.insert("$defs".into(), Value::Object(defs));
    }
    Value::Object(out)
}

fn object_schema(schema: &RecordSchema) -> Value {
    let mut m = Map::new();
    m.insert("title".into(), json!(schema.name()));
    if let Some(d) = schema.description() {
        m.insert("description".into(), json!(d));
    }
    m.insert("type".into(), json!("object"));
    let mut properties = Map::new();
    let mut required: Vec<&str> = Vec::new();
    for field in schema.fields() {
        properties.insert(field.alias.clone(), field_to_json_schema(field));
        if field.required {
            required.push(&field.alias);
        }
    }
    if !properties.is_empty() {
        m.insert("properties".into(), Value::Object(properties));
    }
    if !required.is_empty() {
        m.insert("required".into(), json!(required));
    }
    Value::Object(m)
}

fn field_to_json_schema(field: &FieldSpec) -> Value {
    let mut ty = type_to_json_schema(&field.ty);
    if field.nullable {
        ty = json!({"anyOf": [ty, {"type": "null"}]});
    }
    if let (Some(d), Value::Object(m)) = (&field.description, &mut ty) {
        m.insert("description".into(), json!(d));
    }
    ty
}

fn range(m: &mut Map<String, Value>, r: &NumRange) {
    if let Some(v) = r.gt {
        m.insert("exclusiveMinimum".into(), json!(v));
    }
    if let Some(v) = r.gte {
        m.insert("minimum".into(), json!(v));
    }
    if let Some(v) = r.lt {
        m.insert("exclusiveMaximum".into(), json!(v));
    }
    if let Some(v) = r.lte {
        m.insert("maximum".into(), json!(v));
    }
}

/// Convert a field type to a JSON Schema `Value`.
pub fn type_to_json_schema(ty: &FieldType) -> Value {
    let mut m = Map::new();
    match ty {
        FieldType::Str(s) => {
            m.insert("type".into(), json!("string"));
            if let Some(min) = s.min_len {
                m.insert("minLength".into(), json!(min));
            }
            if let Some(max) = s.max_len {
                m.insert("maxLength".into(), json!(max));
            }
        }
        FieldType::Int(r) => {
            m.insert("type".into(), json!("integer"));
            range(&mut m, r);
        }
        FieldType::Num(r) => {
            m.insert("type".into(), json!("number"));
            range(&mut m, r);
        }
        FieldType::Bool => {
            m.insert("type".into(), json!("boolean"));
        }
        FieldType::Any => {
            m.insert(
                "type".into(),
                json!(["string", "number", "boolean", "array", "object"]),
            );
        }
        FieldType::Enum(e) => {
            m.insert("title".into(), json!(e.name));
            m.insert("type".into(), json!("string"));
            m.insert("enum".into(), json!(e.values));
        }
        FieldType::Union(members) => {
            let any_of: Vec<Value> = members.iter().map(type_to_json_schema).collect();
            m.insert("anyOf".into(), Value::Array(any_of));
        }
        FieldType::Record(schema) => {
            m.insert("$ref".into(), json!(format!("#/$defs/{}", schema.name())));
        }
        FieldType::Seq(s) => {
            m.insert("type".into(), json!("array"));
            m.insert("items".into(), type_to_json_schema(&s.items));
            if let Some(min) = s.min_items {
                m.insert("minItems".into(), json!(min));
            }
            if let Some(max) = s.max_items {
                m.insert("maxItems".into(), json!(max));
            }
        }
        FieldType::Map(value) => {
            m.insert("type".into(), json!("object"));
            m.insert("additionalProperties".into(), type_to_json_schema(value));
        }
    }
    Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_types() {
        assert_eq!(
            type_to_json_schema(&FieldType::int_in(NumRange::new().gte(0.0))),
            json!({"type": "integer", "minimum": 0.0})
        );
        assert_eq!(
            type_to_json_schema(&FieldType::str_len(Some(1), None)),
            json!({"type": "string", "minLength": 1})
        );
        assert_eq!(
            type_to_json_schema(&FieldType::union(vec![FieldType::num(), FieldType::int()])),
            json!({"anyOf": [{"type": "number"}, {"type": "integer"}]})
        );
        assert_eq!(
            type_to_json_schema(&FieldType::map(FieldType::num())),
            json!({"type": "object", "additionalProperties": {"type": "number"}})
        );
    }

    #[test]
    fn record_with_nested_defs() {
        let options = RecordSchema::builder("ContextOptions")
            .field(FieldSpec::optional("include_links", FieldType::bool()).nullable())
            .build()
            .unwrap();
        let payload = RecordSchema::builder("CreateMessageReqPayload")
            .describe("Create a message.")
            .field(FieldSpec::optional("context_options", FieldType::record(&options)).nullable())
            .field(FieldSpec::required("topic_id", FieldType::str()).describe("Topic id."))
            .build()
            .unwrap();

        let js = record_to_json_schema(&payload);
        assert_eq!(
            js,
            json!({
                "title": "CreateMessageReqPayload",
                "description": "Create a message.",
                "type": "object",
                "properties": {
                    "context_options": {
                        "anyOf": [{"$ref": "#/$defs/ContextOptions"}, {"type": "null"}]
                    },
                    "topic_id": {"type": "string", "description": "Topic id."}
                },
                "required": ["topic_id"],
                "$defs": {
                    "ContextOptions": {
                        "title": "ContextOptions",
                        "type": "object",
                        "properties": {
                            "include_links": {
                                "anyOf": [{"type": "boolean"}, {"type": "null"}]
                            }
                        }
                    }
                }
            })
        );
    }
}
