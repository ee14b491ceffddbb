//! Record schema declarations.

pub mod field;
pub mod record;
pub mod validate;
pub mod walker;

pub use field::{EnumSpec, FieldSpec, FieldType, NumRange, SeqSpec, StrSpec};
pub use record::{RecordSchema, RecordSchemaBuilder};
pub use validate::validate_record;
pub use walker::Walker;
