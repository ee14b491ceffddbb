use serde_json::Value;

use super::instance::RecordInstance;

/// A caller-supplied field value, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Explicit null.
    Null,
    /// Any JSON value; nested records may be given as objects keyed by
    /// field name or wire alias.
    Json(Value),
    /// A record already constructed under the field's schema.
    Record(RecordInstance),
    /// Pre-built elements for a sequence-of-record field.
    Records(Vec<RecordInstance>),
}

impl From<Value> for FieldInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            other => Self::Json(other),
        }
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Json(Value::String(value))
    }
}

impl From<bool> for FieldInput {
    fn from(value: bool) -> Self {
        Self::Json(Value::Bool(value))
    }
}

impl From<i32> for FieldInput {
    fn from(value: i32) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i64> for FieldInput {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u64> for FieldInput {
    fn from(value: u64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        // Non-finite floats have no JSON form and become null.
        Value::from(value).into()
    }
}

impl From<RecordInstance> for FieldInput {
    fn from(value: RecordInstance) -> Self {
        Self::Record(value)
    }
}

impl From<Vec<RecordInstance>> for FieldInput {
    fn from(value: Vec<RecordInstance>) -> Self {
        Self::Records(value)
    }
}

impl<T: Into<FieldInput>> From<Option<T>> for FieldInput {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_null_is_explicit_null() {
        assert_eq!(FieldInput::from(json!(null)), FieldInput::Null);
        assert_eq!(FieldInput::from(None::<i64>), FieldInput::Null);
        assert_eq!(FieldInput::from(f64::NAN), FieldInput::Null);
    }

    #[test]
    fn primitives_become_json() {
        assert_eq!(FieldInput::from("t1"), FieldInput::Json(json!("t1")));
        assert_eq!(FieldInput::from(5), FieldInput::Json(json!(5)));
        assert_eq!(FieldInput::from(Some(true)), FieldInput::Json(json!(true)));
        assert_eq!(FieldInput::from(0.5), FieldInput::Json(json!(0.5)));
    }
}
