//! Error taxonomy for construction, encoding and decoding.

use thiserror::Error;

use crate::constants::ErrorCode;
use crate::path::FieldPath;

/// A numeric or length bound was violated.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {code}: {detail}")]
pub struct ConstraintError {
    pub path: FieldPath,
    pub code: ErrorCode,
    pub detail: String,
}

/// Required data is missing or malformed at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{path}: missing required field `{field}` of {record}")]
    MissingField {
        record: String,
        field: String,
        path: FieldPath,
    },
    #[error("{path}: {record} has no field `{field}`")]
    UnknownField {
        record: String,
        field: String,
        path: FieldPath,
    },
    #[error("{path}: field `{field}` supplied more than once")]
    DuplicateField { field: String, path: FieldPath },
    #[error("{path}: field is not nullable")]
    NotNullable { path: FieldPath },
    #[error("{path}: {} (found {found})", .code.message())]
    Type {
        path: FieldPath,
        code: ErrorCode,
        found: &'static str,
    },
    #[error("{path}: expected {record} object, found {found}")]
    NotAnObject {
        record: String,
        path: FieldPath,
        found: &'static str,
    },
    #[error("{path}: expected a {expected} instance, found {found}")]
    SchemaConflict {
        expected: String,
        found: String,
        path: FieldPath,
    },
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

impl ValidationError {
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::MissingField { path, .. }
            | Self::UnknownField { path, .. }
            | Self::DuplicateField { path, .. }
            | Self::NotNullable { path }
            | Self::Type { path, .. }
            | Self::NotAnObject { path, .. }
            | Self::SchemaConflict { path, .. } => path,
            Self::Constraint(e) => &e.path,
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

/// The shape of a JSON value does not match the declared schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaMismatchError {
    #[error("{path}: expected {record} object, found {found}")]
    NotAnObject {
        record: String,
        path: FieldPath,
        found: &'static str,
    },
    #[error("{path}: null is not allowed here")]
    UnexpectedNull { path: FieldPath },
    #[error("{path}: {} (found {found})", .code.message())]
    Type {
        path: FieldPath,
        code: ErrorCode,
        found: &'static str,
    },
    #[error("{path}: unknown key for {record}")]
    UnknownKey { record: String, path: FieldPath },
    #[error("{path}: instance holds field `{field}` unknown to {record}")]
    UnknownField {
        record: String,
        field: String,
        path: FieldPath,
    },
}

impl SchemaMismatchError {
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::NotAnObject { path, .. }
            | Self::UnexpectedNull { path }
            | Self::Type { path, .. }
            | Self::UnknownKey { path, .. }
            | Self::UnknownField { path, .. } => path,
        }
    }
}

/// Any failure reported by the codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatchError),
}

impl CodecError {
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Validation(e) => e.path(),
            Self::SchemaMismatch(e) => e.path(),
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Validation(e) if e.is_constraint())
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch(_))
    }

    /// Reclassifies shape failures found while decoding a JSON payload.
    ///
    /// Decoding shares the construction checks; wrong JSON types, misplaced
    /// nulls, non-object records and rejected unknown keys are mismatches of
    /// the wire shape rather than invalid caller input.
    pub(crate) fn from_decode(e: ValidationError) -> Self {
        match e {
            ValidationError::Type { path, code, found } => {
                SchemaMismatchError::Type { path, code, found }.into()
            }
            ValidationError::NotNullable { path } => {
                SchemaMismatchError::UnexpectedNull { path }.into()
            }
            ValidationError::NotAnObject {
                record,
                path,
                found,
            } => SchemaMismatchError::NotAnObject {
                record,
                path,
                found,
            }
            .into(),
            ValidationError::UnknownField { record, path, .. } => {
                SchemaMismatchError::UnknownKey { record, path }.into()
            }
            other => Self::Validation(other),
        }
    }
}

/// A record schema failed its integrity check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid schema {record}{}: {code}", .field.as_deref().map(|f| format!(".{f}")).unwrap_or_default())]
pub struct SchemaError {
    pub record: String,
    pub field: Option<String>,
    pub code: &'static str,
}

/// Returns the JSON type name of a value, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_is_a_validation_error() {
        let e: ValidationError = ConstraintError {
            path: FieldPath::root().key("page_size"),
            code: ErrorCode::Gte,
            detail: "must be >= 0, got -1".into(),
        }
        .into();
        assert!(e.is_constraint());
        assert_eq!(e.path().to_pointer(), "/page_size");
        assert_eq!(e.to_string(), "/page_size: GTE: must be >= 0, got -1");
        let c: CodecError = e.into();
        assert!(c.is_constraint());
    }

    #[test]
    fn decode_reclassifies_shape_errors() {
        let e = CodecError::from_decode(ValidationError::NotNullable {
            path: FieldPath::root().key("topic_id"),
        });
        assert!(matches!(
            e,
            CodecError::SchemaMismatch(SchemaMismatchError::UnexpectedNull { .. })
        ));

        let e = CodecError::from_decode(ValidationError::MissingField {
            record: "R".into(),
            field: "a".into(),
            path: FieldPath::root().key("a"),
        });
        assert!(matches!(
            e,
            CodecError::Validation(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn schema_error_message() {
        let e = SchemaError {
            record: "Rating".into(),
            field: Some("rating".into()),
            code: "GT_GTE",
        };
        assert_eq!(e.to_string(), "invalid schema Rating.rating: GT_GTE");
        let e = SchemaError {
            record: "".into(),
            field: None,
            code: "NAME_EMPTY",
        };
        assert_eq!(e.to_string(), "invalid schema : NAME_EMPTY");
    }
}
