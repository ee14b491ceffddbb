//! Knobs for the retrieval and completion steps of a message.

use std::sync::{Arc, LazyLock};

use model_codec::{FieldType, RecordSchema};

use crate::{count, number, optional};

pub const HIGHLIGHT_STRATEGIES: [&str; 2] = ["exactmatch", "v1"];

static CONTEXT_OPTIONS: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    RecordSchema::builder("ContextOptions")
        .describe("Controls what chunk data is passed to the model as context.")
        .field(optional(
            "include_links",
            FieldType::bool(),
            "Include chunk links in the context. Defaults to false.",
        ))
        .build()
        .expect("ContextOptions schema")
});

static HIGHLIGHT_OPTIONS: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    RecordSchema::builder("HighlightOptions")
        .describe("How matching spans of each chunk are highlighted.")
        .field(optional(
            "highlight_delimiters",
            FieldType::seq(FieldType::str()),
            "Characters that split chunk text into highlightable units.",
        ))
        .field(optional(
            "highlight_max_length",
            count(),
            "Maximum number of characters in one highlight.",
        ))
        .field(optional(
            "highlight_max_num",
            count(),
            "Maximum number of highlights per chunk.",
        ))
        .field(optional(
            "highlight_results",
            FieldType::bool(),
            "Whether to highlight results at all. Defaults to true.",
        ))
        .field(optional(
            "highlight_strategy",
            FieldType::enumeration("HighlightStrategy", HIGHLIGHT_STRATEGIES),
            "Highlighting algorithm.",
        ))
        .field(optional(
            "highlight_threshold",
            FieldType::num_in(model_codec::NumRange::new().gte(0.0).lte(1.0)),
            "Similarity a span must reach to be highlighted.",
        ))
        .field(optional(
            "highlight_window",
            count(),
            "Words of surrounding text kept around each highlight.",
        ))
        .field(optional(
            "pre_tag",
            FieldType::str(),
            "Markup inserted before each highlight.",
        ))
        .field(optional(
            "post_tag",
            FieldType::str(),
            "Markup inserted after each highlight.",
        ))
        .build()
        .expect("HighlightOptions schema")
});

static LLM_OPTIONS: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    RecordSchema::builder("LLMOptions")
        .describe("Parameters forwarded to the completion model.")
        .field(optional(
            "completion_first",
            FieldType::bool(),
            "Stream the completion before the retrieved chunks.",
        ))
        .field(optional("frequency_penalty", number(), "Frequency penalty."))
        .field(optional("max_tokens", count(), "Maximum tokens to generate."))
        .field(optional("presence_penalty", number(), "Presence penalty."))
        .field(optional(
            "stop_tokens",
            FieldType::seq_len(FieldType::str(), None, Some(4)),
            "Sequences that end generation.",
        ))
        .field(optional(
            "stream_response",
            FieldType::bool(),
            "Stream the response. Defaults to true.",
        ))
        .field(optional(
            "system_prompt",
            FieldType::str(),
            "Overrides the dataset's system prompt.",
        ))
        .field(optional("temperature", number(), "Sampling temperature."))
        .build()
        .expect("LLMOptions schema")
});

static SORT_OPTIONS: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    RecordSchema::builder("SortOptions")
        .describe("Re-ordering applied to retrieved chunks.")
        .field(optional(
            "tag_weights",
            FieldType::map(FieldType::num()),
            "Score multipliers keyed by tag.",
        ))
        .field(optional(
            "use_weights",
            FieldType::bool(),
            "Apply each chunk's stored weight. Defaults to true.",
        ))
        .build()
        .expect("SortOptions schema")
});

pub fn context_options() -> &'static Arc<RecordSchema> {
    &CONTEXT_OPTIONS
}

pub fn highlight_options() -> &'static Arc<RecordSchema> {
    &HIGHLIGHT_OPTIONS
}

pub fn llm_options() -> &'static Arc<RecordSchema> {
    &LLM_OPTIONS
}

pub fn sort_options() -> &'static Arc<RecordSchema> {
    &SORT_OPTIONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_codec::{ModelCodec, ValidationError};
    use serde_json::json;

    #[test]
    fn highlight_strategy_is_closed() {
        let codec = ModelCodec::new(Arc::clone(highlight_options()));
        assert!(codec
            .validate_construct([("highlight_strategy", "v1")])
            .is_ok());
        assert!(matches!(
            codec.validate_construct([("highlight_strategy", "fuzzy")]),
            Err(ValidationError::Type { .. })
        ));
    }

    #[test]
    fn stop_tokens_are_bounded() {
        let codec = ModelCodec::new(Arc::clone(llm_options()));
        let err = codec
            .deserialize(&json!({"stop_tokens": ["a", "b", "c", "d", "e"]}))
            .unwrap_err();
        assert!(err.is_constraint());
        assert_eq!(err.path().to_pointer(), "/stop_tokens");
    }

    #[test]
    fn tag_weights_keep_their_order() {
        let codec = ModelCodec::new(Arc::clone(sort_options()));
        let wire = json!({"tag_weights": {"news": 2.0, "blog": 0.5}, "use_weights": null});
        let r = codec.deserialize(&wire).unwrap().unwrap();
        let out = codec.serialize(&r).unwrap();
        assert_eq!(serde_json::to_string(&out).unwrap(), serde_json::to_string(&wire).unwrap());
    }
}
