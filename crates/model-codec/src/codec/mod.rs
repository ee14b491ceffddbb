//! Schema-driven encode / decode of record instances.
//!
//! A [`ModelCodec`] is bound to one [`RecordSchema`]. Nested record fields
//! are handled by codecs bound to the nested schemas, which inherit the
//! parent's [`CodecOptions`].

pub(crate) mod construct;
mod decode;
mod encode;

use std::sync::Arc;

use serde_json::Value;

use crate::error::{CodecError, SchemaMismatchError, ValidationError};
use crate::path::FieldPath;
use crate::schema::RecordSchema;
use crate::value::{FieldInput, RecordInstance};

/// Policy for JSON keys that match no field while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    #[default]
    Ignore,
    Reject,
}

/// Options for the codec.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    pub unknown_keys: UnknownKeys,
}

/// Bidirectional, schema-validated conversion between [`RecordInstance`]
/// and JSON values.
#[derive(Debug, Clone)]
pub struct ModelCodec {
    schema: Arc<RecordSchema>,
    options: CodecOptions,
}

impl ModelCodec {
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        Self::with_options(schema, CodecOptions::default())
    }

    pub fn with_options(schema: Arc<RecordSchema>, options: CodecOptions) -> Self {
        Self { schema, options }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Codec for a nested record schema, sharing this codec's options.
    pub(crate) fn nested(&self, schema: &Arc<RecordSchema>) -> Self {
        Self::with_options(Arc::clone(schema), self.options.clone())
    }

    /// Builds an instance from `(field name, value)` pairs.
    ///
    /// Any subset of fields may be given; every required field must be among
    /// them. Fields left out stay never-supplied, `FieldInput::Null` marks a
    /// nullable field as explicitly null.
    pub fn validate_construct<I, K, V>(&self, fields: I) -> Result<RecordInstance, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldInput>,
    {
        construct::construct_record(&self.schema, fields, &FieldPath::root()).inspect_err(|e| {
            tracing::debug!(record = %self.schema.name(), error = %e, "construct failed");
        })
    }

    /// Encodes an instance as a JSON object keyed by wire alias, in schema
    /// declaration order.
    pub fn serialize(&self, instance: &RecordInstance) -> Result<Value, CodecError> {
        let out = self.encode_at(instance, &FieldPath::root());
        if let Err(e) = &out {
            tracing::debug!(record = %self.schema.name(), error = %e, "encode failed");
        } else {
            tracing::trace!(record = %self.schema.name(), "encoded");
        }
        out
    }

    /// Decodes a JSON object. `null` decodes to `Ok(None)`.
    pub fn deserialize(&self, value: &Value) -> Result<Option<RecordInstance>, CodecError> {
        if value.is_null() {
            return Ok(None);
        }
        self.deserialize_record(value).map(Some)
    }

    /// Decodes a JSON object that must be present.
    pub fn deserialize_record(&self, value: &Value) -> Result<RecordInstance, CodecError> {
        let out = self.decode_at(value, &FieldPath::root());
        match &out {
            Ok(_) => tracing::trace!(record = %self.schema.name(), "decoded"),
            Err(e) => tracing::debug!(record = %self.schema.name(), error = %e, "decode failed"),
        }
        out
    }

    fn not_an_object(&self, value: &Value, path: &FieldPath) -> CodecError {
        SchemaMismatchError::NotAnObject {
            record: self.schema.name().to_string(),
            path: path.clone(),
            found: crate::error::json_kind(value),
        }
        .into()
    }
}
