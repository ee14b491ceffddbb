//! Validated construction of record instances.
//!
//! The same checks back JSON decoding: `Mode` selects how object keys are
//! matched to fields and whether unknown keys are tolerated.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::{CodecOptions, UnknownKeys};
use crate::constants::ErrorCode;
use crate::error::{json_kind, ConstraintError, ValidationError};
use crate::path::FieldPath;
use crate::schema::{FieldSpec, FieldType, NumRange, RecordSchema, SeqSpec, StrSpec};
use crate::value::{FieldInput, FieldValue, Presence, RecordInstance};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Mode<'a> {
    /// Caller input: keys are field names, or wire aliases as a fallback.
    Construct,
    /// Wire input: keys are wire aliases.
    Decode(&'a CodecOptions),
}

/// Builds an instance from `(name, input)` pairs.
pub(crate) fn construct_record<I, K, V>(
    schema: &Arc<RecordSchema>,
    fields: I,
    path: &FieldPath,
) -> Result<RecordInstance, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<FieldInput>,
{
    let mut slots = vec![Presence::Absent; schema.len()];
    let mut supplied = vec![false; schema.len()];
    for (key, input) in fields {
        let key = key.as_ref();
        let index = resolve_key(schema, key, path)?;
        let spec = &schema.fields()[index];
        if std::mem::replace(&mut supplied[index], true) {
            return Err(ValidationError::DuplicateField {
                field: spec.name.clone(),
                path: path.key(&spec.name),
            });
        }
        slots[index] = convert_field(spec, input.into(), &path.key(&spec.name))?;
    }
    finish(schema, slots, path)
}

/// Validates one field input into its tri-state.
pub(crate) fn convert_field(
    spec: &FieldSpec,
    input: FieldInput,
    path: &FieldPath,
) -> Result<Presence, ValidationError> {
    match input {
        FieldInput::Null | FieldInput::Json(Value::Null) => null_for(spec, path),
        FieldInput::Json(value) => {
            check_value(&spec.ty, &value, path, Mode::Construct).map(Presence::Set)
        }
        FieldInput::Record(record) => match &spec.ty {
            FieldType::Record(expected) => {
                adopt(expected, &record, path)?;
                Ok(Presence::Set(FieldValue::Record(record)))
            }
            other => Err(type_error(other, path, "record")),
        },
        FieldInput::Records(records) => match &spec.ty {
            FieldType::Seq(seq) => {
                let FieldType::Record(expected) = seq.items.as_ref() else {
                    return Err(type_error(&seq.items, &path.index(0), "record"));
                };
                check_items_len(seq, records.len(), path)?;
                for (i, record) in records.iter().enumerate() {
                    adopt(expected, record, &path.index(i))?;
                }
                Ok(Presence::Set(FieldValue::List(
                    records.into_iter().map(FieldValue::Record).collect(),
                )))
            }
            other => Err(type_error(other, path, "array")),
        },
    }
}

/// Builds an instance from a JSON object.
pub(crate) fn record_from_object(
    schema: &Arc<RecordSchema>,
    object: &Map<String, Value>,
    path: &FieldPath,
    mode: Mode<'_>,
) -> Result<RecordInstance, ValidationError> {
    match mode {
        Mode::Construct => construct_record(
            schema,
            object
                .iter()
                .map(|(k, v)| (k.as_str(), FieldInput::from(v.clone()))),
            path,
        ),
        Mode::Decode(options) => {
            let mut slots = Vec::with_capacity(schema.len());
            for spec in schema.fields() {
                let field_path = path.key(&spec.alias);
                let presence = match object.get(&spec.alias) {
                    None => Presence::Absent,
                    Some(Value::Null) => null_for(spec, &field_path)?,
                    Some(value) => Presence::Set(check_value(&spec.ty, value, &field_path, mode)?),
                };
                slots.push(presence);
            }
            if options.unknown_keys == UnknownKeys::Reject {
                if let Some(key) = object
                    .keys()
                    .find(|k| !schema.fields().iter().any(|f| &f.alias == *k))
                {
                    return Err(ValidationError::UnknownField {
                        record: schema.name().to_string(),
                        field: key.clone(),
                        path: path.key(key),
                    });
                }
            }
            finish(schema, slots, path)
        }
    }
}

/// Checks a non-null JSON value against a field type.
pub(crate) fn check_value(
    ty: &FieldType,
    value: &Value,
    path: &FieldPath,
    mode: Mode<'_>,
) -> Result<FieldValue, ValidationError> {
    if value.is_null() {
        return Err(ValidationError::NotNullable { path: path.clone() });
    }
    match ty {
        FieldType::Str(spec) => {
            let Some(s) = value.as_str() else {
                return Err(type_error(ty, path, json_kind(value)));
            };
            check_str_len(spec, s, path)?;
        }
        FieldType::Int(range) => {
            let is_int = value.is_i64() || value.is_u64();
            let Some(n) = value.as_f64().filter(|_| is_int) else {
                return Err(type_error(ty, path, json_kind(value)));
            };
            check_range(range, n, value, path)?;
        }
        FieldType::Num(range) => {
            let Some(n) = value.as_f64() else {
                return Err(type_error(ty, path, json_kind(value)));
            };
            check_range(range, n, value, path)?;
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                return Err(type_error(ty, path, json_kind(value)));
            }
        }
        FieldType::Any => {}
        FieldType::Enum(spec) => {
            if !value.as_str().is_some_and(|s| spec.contains(s)) {
                return Err(type_error(ty, path, json_kind(value)));
            }
        }
        FieldType::Union(members) => return check_union(ty, members, value, path, mode),
        FieldType::Record(schema) => {
            let Some(object) = value.as_object() else {
                return Err(ValidationError::NotAnObject {
                    record: schema.name().to_string(),
                    path: path.clone(),
                    found: json_kind(value),
                });
            };
            return record_from_object(schema, object, path, mode).map(FieldValue::Record);
        }
        FieldType::Seq(seq) => {
            let Some(items) = value.as_array() else {
                return Err(type_error(ty, path, json_kind(value)));
            };
            check_items_len(seq, items.len(), path)?;
            return items
                .iter()
                .enumerate()
                .map(|(i, item)| check_value(&seq.items, item, &path.index(i), mode))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List);
        }
        FieldType::Map(value_type) => {
            let Some(object) = value.as_object() else {
                return Err(type_error(ty, path, json_kind(value)));
            };
            return object
                .iter()
                .map(|(k, v)| {
                    check_value(value_type, v, &path.key(k), mode).map(|v| (k.clone(), v))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Map);
        }
    }
    Ok(FieldValue::Scalar(value.clone()))
}

/// Wire error code for a value that does not have the expected type.
pub(crate) fn expected_code(ty: &FieldType) -> ErrorCode {
    match ty {
        FieldType::Str(_) => ErrorCode::Str,
        FieldType::Int(_) => ErrorCode::Int,
        FieldType::Num(_) => ErrorCode::Num,
        FieldType::Bool => ErrorCode::Bool,
        FieldType::Any => ErrorCode::Null,
        FieldType::Enum(_) => ErrorCode::Enum,
        FieldType::Union(_) => ErrorCode::Or,
        FieldType::Record(_) => ErrorCode::Obj,
        FieldType::Seq(_) => ErrorCode::Arr,
        FieldType::Map(_) => ErrorCode::Map,
    }
}

fn type_error(ty: &FieldType, path: &FieldPath, found: &'static str) -> ValidationError {
    ValidationError::Type {
        path: path.clone(),
        code: expected_code(ty),
        found,
    }
}

fn null_for(spec: &FieldSpec, path: &FieldPath) -> Result<Presence, ValidationError> {
    if spec.nullable {
        Ok(Presence::Null)
    } else {
        Err(ValidationError::NotNullable { path: path.clone() })
    }
}

fn resolve_key(
    schema: &RecordSchema,
    key: &str,
    path: &FieldPath,
) -> Result<usize, ValidationError> {
    schema
        .position(key)
        .or_else(|| schema.fields().iter().position(|f| f.alias == key))
        .ok_or_else(|| ValidationError::UnknownField {
            record: schema.name().to_string(),
            field: key.to_string(),
            path: path.key(key),
        })
}

fn finish(
    schema: &Arc<RecordSchema>,
    slots: Vec<Presence>,
    path: &FieldPath,
) -> Result<RecordInstance, ValidationError> {
    for (spec, slot) in schema.fields().iter().zip(&slots) {
        if spec.required && !slot.is_explicit() {
            return Err(ValidationError::MissingField {
                record: schema.name().to_string(),
                field: spec.name.clone(),
                path: path.key(&spec.name),
            });
        }
    }
    Ok(RecordInstance::from_parts(Arc::clone(schema), slots))
}

fn adopt(
    expected: &Arc<RecordSchema>,
    record: &RecordInstance,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    if expected.same_as(record.schema()) {
        return Ok(());
    }
    Err(ValidationError::SchemaConflict {
        expected: expected.name().to_string(),
        found: record.schema().name().to_string(),
        path: path.clone(),
    })
}

fn check_union(
    ty: &FieldType,
    members: &[FieldType],
    value: &Value,
    path: &FieldPath,
    mode: Mode<'_>,
) -> Result<FieldValue, ValidationError> {
    let mut constraint = None;
    for member in members {
        match check_value(member, value, path, mode) {
            Ok(v) => return Ok(v),
            Err(e @ ValidationError::Constraint(_)) => {
                constraint.get_or_insert(e);
            }
            Err(_) => {}
        }
    }
    Err(constraint.unwrap_or_else(|| type_error(ty, path, json_kind(value))))
}

fn check_range(
    range: &NumRange,
    n: f64,
    raw: &Value,
    path: &FieldPath,
) -> Result<(), ConstraintError> {
    let fail = |code: ErrorCode, op: &str, bound: f64| ConstraintError {
        path: path.clone(),
        code,
        detail: format!("must be {op} {bound}, got {raw}"),
    };
    if let Some(gt) = range.gt {
        if n <= gt {
            return Err(fail(ErrorCode::Gt, ">", gt));
        }
    }
    if let Some(gte) = range.gte {
        if n < gte {
            return Err(fail(ErrorCode::Gte, ">=", gte));
        }
    }
    if let Some(lt) = range.lt {
        if n >= lt {
            return Err(fail(ErrorCode::Lt, "<", lt));
        }
    }
    if let Some(lte) = range.lte {
        if n > lte {
            return Err(fail(ErrorCode::Lte, "<=", lte));
        }
    }
    Ok(())
}

fn check_str_len(spec: &StrSpec, s: &str, path: &FieldPath) -> Result<(), ConstraintError> {
    check_len(ErrorCode::StrLen, spec.min_len, spec.max_len, s.chars().count(), path)
}

fn check_items_len(spec: &SeqSpec, len: usize, path: &FieldPath) -> Result<(), ConstraintError> {
    check_len(ErrorCode::ArrLen, spec.min_items, spec.max_items, len, path)
}

fn check_len(
    code: ErrorCode,
    min: Option<u64>,
    max: Option<u64>,
    len: usize,
    path: &FieldPath,
) -> Result<(), ConstraintError> {
    let len = len as u64;
    let detail = match (min, max) {
        (Some(min), _) if len < min => format!("length {len} is below {min}"),
        (_, Some(max)) if len > max => format!("length {len} is above {max}"),
        _ => return Ok(()),
    };
    Err(ConstraintError {
        path: path.clone(),
        code,
        detail,
    })
}
