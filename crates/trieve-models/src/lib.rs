//! Record schemas for a slice of the Trieve API.
//!
//! Each model is a [`RecordSchema`] built once per process and shared
//! through an accessor, so every [`ModelCodec`](model_codec::ModelCodec)
//! bound to the same model sees the same allocation. Optional fields of the
//! API models all accept an explicit `null`.

pub mod filter;
pub mod message;
pub mod options;
pub mod rating;

use std::sync::Arc;

use model_codec::{FieldSpec, FieldType, RecordSchema};

pub use filter::{chunk_filter, field_condition, range};
pub use message::{create_message_req_payload, SEARCH_METHODS};
pub use options::{context_options, highlight_options, llm_options, sort_options, HIGHLIGHT_STRATEGIES};
pub use rating::search_query_rating;

/// Every model in this crate, dependencies first.
pub fn all() -> Vec<&'static Arc<RecordSchema>> {
    vec![
        range(),
        field_condition(),
        chunk_filter(),
        context_options(),
        highlight_options(),
        llm_options(),
        sort_options(),
        create_message_req_payload(),
        search_query_rating(),
    ]
}

/// Optional field that also accepts an explicit `null`.
pub(crate) fn optional(name: &str, ty: FieldType, description: &str) -> FieldSpec {
    FieldSpec::optional(name, ty).nullable().describe(description)
}

/// Non-negative integer.
pub(crate) fn count() -> FieldType {
    FieldType::int_in(model_codec::NumRange::new().gte(0.0))
}

/// `float | int`, as the API types numeric knobs.
pub(crate) fn number() -> FieldType {
    FieldType::union(vec![FieldType::num(), FieldType::int()])
}
