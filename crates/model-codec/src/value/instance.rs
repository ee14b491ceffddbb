use std::sync::Arc;

use serde_json::Value;

use super::input::FieldInput;
use crate::codec::construct::convert_field;
use crate::codec::ModelCodec;
use crate::error::{CodecError, ValidationError};
use crate::path::FieldPath;
use crate::schema::{FieldSpec, RecordSchema};

/// A validated field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Primitive, enum, union member or untyped JSON.
    Scalar(Value),
    Record(RecordInstance),
    List(Vec<FieldValue>),
    /// Map entries in their original order.
    Map(Vec<(String, FieldValue)>),
}

impl FieldValue {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_json().and_then(Value::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_json().and_then(Value::as_bool)
    }

    pub fn as_record(&self) -> Option<&RecordInstance> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, FieldValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Per-field tri-state: never supplied, explicitly null, or set.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Presence {
    #[default]
    Absent,
    Null,
    Set(FieldValue),
}

impl Presence {
    /// Whether the caller supplied the field, including as null.
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }
}

/// A record validated against exactly one [`RecordSchema`].
///
/// Holds one [`Presence`] per schema field, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInstance {
    schema: Arc<RecordSchema>,
    slots: Vec<Presence>,
}

impl RecordInstance {
    /// Callers guarantee `slots` lines up with `schema.fields()` and that
    /// every required slot is explicit.
    pub(crate) fn from_parts(schema: Arc<RecordSchema>, slots: Vec<Presence>) -> Self {
        debug_assert_eq!(schema.len(), slots.len());
        Self { schema, slots }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Tri-state of the field called `name`; `None` if the schema has no
    /// such field.
    pub fn presence(&self, name: &str) -> Option<&Presence> {
        self.schema.position(name).map(|i| &self.slots[i])
    }

    /// The value of a set field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.presence(name).and_then(Presence::value)
    }

    pub fn is_explicit(&self, name: &str) -> bool {
        self.presence(name).is_some_and(Presence::is_explicit)
    }

    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.presence(name), Some(Presence::Null))
    }

    /// Fields paired with their tri-state, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldSpec, &Presence)> {
        self.schema.fields().iter().zip(self.slots.iter())
    }

    /// Validated assignment. On failure the instance is left unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<FieldInput>) -> Result<(), ValidationError> {
        let index = self.index_of(name)?;
        let spec = &self.schema.fields()[index];
        let presence = convert_field(spec, value.into(), &FieldPath::root().key(name))?;
        self.slots[index] = presence;
        Ok(())
    }

    /// Returns an optional field to the never-supplied state.
    pub fn clear(&mut self, name: &str) -> Result<(), ValidationError> {
        let index = self.index_of(name)?;
        if self.schema.fields()[index].required {
            return Err(ValidationError::MissingField {
                record: self.schema.name().to_string(),
                field: name.to_string(),
                path: FieldPath::root().key(name),
            });
        }
        self.slots[index] = Presence::Absent;
        Ok(())
    }

    /// Serializes through this instance's own schema.
    pub fn to_json(&self) -> Result<Value, CodecError> {
        ModelCodec::new(Arc::clone(&self.schema)).serialize(self)
    }

    fn index_of(&self, name: &str) -> Result<usize, ValidationError> {
        self.schema
            .position(name)
            .ok_or_else(|| ValidationError::UnknownField {
                record: self.schema.name().to_string(),
                field: name.to_string(),
                path: FieldPath::root().key(name),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, NumRange};
    use serde_json::json;

    fn codec() -> ModelCodec {
        let schema = RecordSchema::builder("SearchQueryRating")
            .field(FieldSpec::optional("note", FieldType::str()).nullable())
            .field(FieldSpec::required(
                "rating",
                FieldType::int_in(NumRange::new().gte(0.0)),
            ))
            .build()
            .unwrap();
        ModelCodec::new(schema)
    }

    #[test]
    fn presence_accessors() {
        let r = codec()
            .validate_construct([("rating", FieldInput::from(3)), ("note", FieldInput::Null)])
            .unwrap();
        assert_eq!(r.get("rating").and_then(FieldValue::as_i64), Some(3));
        assert!(r.is_explicit("note"));
        assert!(r.is_null("note"));
        assert!(r.get("note").is_none());
        assert!(r.presence("nope").is_none());
        assert!(!r.is_explicit("nope"));
    }

    #[test]
    fn set_validates_and_tracks_presence() {
        let mut r = codec().validate_construct([("rating", 3)]).unwrap();
        assert!(!r.is_explicit("note"));
        r.set("note", "fine").unwrap();
        assert_eq!(r.get("note").and_then(FieldValue::as_str), Some("fine"));
        assert_eq!(r.to_json().unwrap(), json!({"note": "fine", "rating": 3}));

        let err = r.set("rating", -1).unwrap_err();
        assert!(err.is_constraint());
        assert_eq!(r.get("rating").and_then(FieldValue::as_i64), Some(3));

        let err = r.set("rating", FieldInput::Null).unwrap_err();
        assert!(matches!(err, ValidationError::NotNullable { .. }));
        assert!(matches!(
            r.set("bogus", 1),
            Err(ValidationError::UnknownField { .. })
        ));
    }

    #[test]
    fn clear_only_optional_fields() {
        let mut r = codec()
            .validate_construct([("rating", FieldInput::from(3)), ("note", FieldInput::Null)])
            .unwrap();
        r.clear("note").unwrap();
        assert!(!r.is_explicit("note"));
        assert_eq!(r.to_json().unwrap(), json!({"rating": 3}));
        assert!(matches!(
            r.clear("rating"),
            Err(ValidationError::MissingField { .. })
        ));
    }
}
