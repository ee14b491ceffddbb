//! In-memory record values.

pub mod input;
pub mod instance;

pub use input::FieldInput;
pub use instance::{FieldValue, Presence, RecordInstance};
