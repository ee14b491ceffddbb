use std::sync::{Arc, LazyLock};

use model_codec::{FieldSpec, FieldType, RecordSchema};

use crate::optional;

static SEARCH_QUERY_RATING: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    RecordSchema::builder("SearchQueryRating")
        .field(optional("note", FieldType::str(), "Free-form comment on the results."))
        .field(FieldSpec::required("rating", FieldType::int()).describe("Score given to the results."))
        .build()
        .expect("SearchQueryRating schema")
});

pub fn search_query_rating() -> &'static Arc<RecordSchema> {
    &SEARCH_QUERY_RATING
}
