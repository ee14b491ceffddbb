use serde_json::{Map, Value};

use super::construct::expected_code;
use super::ModelCodec;
use crate::error::{json_kind, CodecError, SchemaMismatchError};
use crate::path::FieldPath;
use crate::schema::FieldType;
use crate::value::{FieldValue, Presence, RecordInstance};

impl ModelCodec {
    /// Encodes `instance` against this codec's schema.
    ///
    /// Fields are looked up by name, so an instance built under an older
    /// copy of the schema is still checked against the current nullability.
    pub(super) fn encode_at(
        &self,
        instance: &RecordInstance,
        path: &FieldPath,
    ) -> Result<Value, CodecError> {
        for (spec, presence) in instance.iter() {
            if presence.is_explicit() && self.schema().field(&spec.name).is_none() {
                return Err(SchemaMismatchError::UnknownField {
                    record: self.schema().name().to_string(),
                    field: spec.name.clone(),
                    path: path.key(&spec.name),
                }
                .into());
            }
        }

        let mut out = Map::new();
        for spec in self.schema().fields() {
            let field_path = path.key(&spec.alias);
            match instance.presence(&spec.name) {
                None | Some(Presence::Absent) => continue,
                Some(Presence::Null) => {
                    if !spec.nullable {
                        return Err(SchemaMismatchError::UnexpectedNull { path: field_path }.into());
                    }
                    out.insert(spec.alias.clone(), Value::Null);
                }
                Some(Presence::Set(value)) => {
                    let encoded = self.encode_value(&spec.ty, value, &field_path)?;
                    out.insert(spec.alias.clone(), encoded);
                }
            }
        }
        Ok(Value::Object(out))
    }

    fn encode_value(
        &self,
        ty: &FieldType,
        value: &FieldValue,
        path: &FieldPath,
    ) -> Result<Value, CodecError> {
        match (ty, value) {
            (FieldType::Record(schema), FieldValue::Record(record)) => {
                self.nested(schema).encode_at(record, path)
            }
            (FieldType::Seq(seq), FieldValue::List(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.encode_value(&seq.items, item, &path.index(i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (FieldType::Map(value_type), FieldValue::Map(entries)) => {
                let mut out = Map::new();
                for (key, item) in entries {
                    out.insert(key.clone(), self.encode_value(value_type, item, &path.key(key))?);
                }
                Ok(Value::Object(out))
            }
            (
                FieldType::Str(_)
                | FieldType::Int(_)
                | FieldType::Num(_)
                | FieldType::Bool
                | FieldType::Any
                | FieldType::Enum(_)
                | FieldType::Union(_),
                FieldValue::Scalar(raw),
            ) => Ok(raw.clone()),
            (ty, value) => Err(SchemaMismatchError::Type {
                path: path.clone(),
                code: expected_code(ty),
                found: value_kind(value),
            }
            .into()),
        }
    }
}

fn value_kind(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Scalar(v) => json_kind(v),
        FieldValue::Record(_) => "record",
        FieldValue::List(_) => "array",
        FieldValue::Map(_) => "map",
    }
}
