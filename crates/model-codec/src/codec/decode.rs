use serde_json::Value;

use super::construct::{record_from_object, Mode};
use super::ModelCodec;
use crate::error::CodecError;
use crate::path::FieldPath;
use crate::value::RecordInstance;

impl ModelCodec {
    /// Decodes one record object. A failure anywhere below, including in a
    /// single sequence element, fails the whole record.
    pub(super) fn decode_at(
        &self,
        value: &Value,
        path: &FieldPath,
    ) -> Result<RecordInstance, CodecError> {
        let Some(object) = value.as_object() else {
            return Err(self.not_an_object(value, path));
        };
        record_from_object(self.schema(), object, path, Mode::Decode(self.options()))
            .map_err(CodecError::from_decode)
    }
}
