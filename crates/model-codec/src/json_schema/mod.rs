pub mod converter;

pub use converter::{record_to_json_schema, type_to_json_schema};
