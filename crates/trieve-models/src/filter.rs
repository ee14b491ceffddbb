//! Chunk filters.

use std::sync::{Arc, LazyLock};

use model_codec::{FieldSpec, FieldType, RecordSchema};

use crate::{number, optional};

static RANGE: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    RecordSchema::builder("Range")
        .describe("Numeric bounds a metadata value must fall within.")
        .field(optional("gt", number(), "Strictly greater than."))
        .field(optional("gte", number(), "Greater than or equal to."))
        .field(optional("lt", number(), "Strictly less than."))
        .field(optional("lte", number(), "Less than or equal to."))
        .build()
        .expect("Range schema")
});

static FIELD_CONDITION: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    let value = FieldType::union(vec![FieldType::str(), FieldType::int(), FieldType::num()]);
    RecordSchema::builder("FieldCondition")
        .describe("A condition on one chunk field or metadata key.")
        .field(
            FieldSpec::required("field", FieldType::str())
                .describe("Field to filter on, e.g. `tag_set` or `metadata.key`."),
        )
        .field(optional(
            "boolean",
            FieldType::bool(),
            "Match chunks whose boolean field has this value.",
        ))
        .field(optional(
            "match_all",
            FieldType::seq(value.clone()),
            "Every value must be present on the chunk.",
        ))
        .field(optional(
            "match_any",
            FieldType::seq(value),
            "At least one value must be present on the chunk.",
        ))
        .field(optional("range", FieldType::record(&RANGE), "Numeric bounds for the field."))
        .build()
        .expect("FieldCondition schema")
});

static CHUNK_FILTER: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    let conditions = || FieldType::seq(FieldType::record(&FIELD_CONDITION));
    RecordSchema::builder("ChunkFilter")
        .describe("Filters applied to chunks before scoring.")
        .field(optional("must", conditions(), "Every condition must match."))
        .field(optional("must_not", conditions(), "No condition may match."))
        .field(optional("should", conditions(), "At least one condition must match."))
        .field(optional(
            "jsonb_prefilter",
            FieldType::bool(),
            "Apply metadata conditions in the database before the vector search.",
        ))
        .build()
        .expect("ChunkFilter schema")
});

pub fn range() -> &'static Arc<RecordSchema> {
    &RANGE
}

pub fn field_condition() -> &'static Arc<RecordSchema> {
    &FIELD_CONDITION
}

pub fn chunk_filter() -> &'static Arc<RecordSchema> {
    &CHUNK_FILTER
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_codec::ModelCodec;
    use serde_json::json;

    #[test]
    fn nested_records_share_one_allocation() {
        let FieldType::Record(inner) = &field_condition().field("range").unwrap().ty else {
            panic!("range is a record field");
        };
        assert!(Arc::ptr_eq(inner, range()));
    }

    #[test]
    fn mixed_match_values() {
        let codec = ModelCodec::new(Arc::clone(chunk_filter()));
        let wire = json!({
            "should": [{"field": "tag_set", "match_any": ["a", 1, 2.5]}],
            "jsonb_prefilter": false
        });
        let r = codec.deserialize(&wire).unwrap().unwrap();
        assert_eq!(codec.serialize(&r).unwrap(), wire);
        assert!(!r.is_explicit("must"));
    }
}
