//! Schema-driven model serialization.
//!
//! A [`RecordSchema`] declares the fields of a data model: semantic type,
//! wire alias, whether the field is required, and whether `null` is a legal
//! value. A [`ModelCodec`] bound to a schema builds validated
//! [`RecordInstance`]s and converts them to and from JSON objects.
//!
//! Every field of an instance is in one of three states ([`Presence`]):
//! never supplied, explicitly null, or set. Serialization omits the first,
//! emits `null` for the second, and encodes the third, so a field that was
//! never supplied is never confused with one the caller cleared on purpose.
//!
//! ```
//! use model_codec::{FieldInput, FieldSpec, FieldType, ModelCodec, NumRange, RecordSchema};
//! use serde_json::json;
//!
//! let schema = RecordSchema::builder("CreateMessageReqPayload")
//!     .field(FieldSpec::required("topic_id", FieldType::str()))
//!     .field(FieldSpec::optional("page_size", FieldType::int_in(NumRange::new().gte(0.0))).nullable())
//!     .build()
//!     .unwrap();
//! let codec = ModelCodec::new(schema);
//!
//! let r = codec
//!     .validate_construct([("topic_id", FieldInput::from("t1")), ("page_size", FieldInput::Null)])
//!     .unwrap();
//! assert_eq!(codec.serialize(&r).unwrap(), json!({"topic_id": "t1", "page_size": null}));
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod json_schema;
pub mod path;
pub mod sample;
pub mod schema;
pub mod value;

pub use codec::{CodecOptions, ModelCodec, UnknownKeys};
pub use constants::ErrorCode;
pub use error::{CodecError, ConstraintError, SchemaError, SchemaMismatchError, ValidationError};
pub use json_schema::record_to_json_schema;
pub use path::{FieldPath, PathSegment};
pub use sample::{make_instance, Random};
pub use schema::{
    EnumSpec, FieldSpec, FieldType, NumRange, RecordSchema, RecordSchemaBuilder, SeqSpec, StrSpec,
    Walker,
};
pub use value::{FieldInput, FieldValue, Presence, RecordInstance};
