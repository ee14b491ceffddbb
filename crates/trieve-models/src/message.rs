use std::sync::{Arc, LazyLock};

use model_codec::{FieldSpec, FieldType, NumRange, RecordSchema};

use crate::filter::chunk_filter;
use crate::options::{context_options, highlight_options, llm_options, sort_options};
use crate::{count, number, optional};

pub const SEARCH_METHODS: [&str; 4] = ["fulltext", "semantic", "hybrid", "bm25"];

static CREATE_MESSAGE_REQ_PAYLOAD: LazyLock<Arc<RecordSchema>> = LazyLock::new(|| {
    RecordSchema::builder("CreateMessageReqPayload")
        .describe("Request body for adding a user message to a topic and generating a reply.")
        .field(optional(
            "audio_input",
            FieldType::str(),
            "Base64 encoded audio of the user message.",
        ))
        .field(optional(
            "concat_user_messages_query",
            FieldType::bool(),
            "Search with all user messages of the topic concatenated. Defaults to false.",
        ))
        .field(optional(
            "context_options",
            FieldType::record(context_options()),
            "What chunk data is passed to the model.",
        ))
        .field(optional(
            "filters",
            FieldType::record(chunk_filter()),
            "Filters applied to the retrieval step.",
        ))
        .field(optional(
            "highlight_options",
            FieldType::record(highlight_options()),
            "How retrieved chunks are highlighted.",
        ))
        .field(optional(
            "image_urls",
            FieldType::seq(FieldType::str()),
            "URLs of images to attach to the message.",
        ))
        .field(optional(
            "llm_options",
            FieldType::record(llm_options()),
            "Parameters for the completion model.",
        ))
        .field(optional(
            "new_message_content",
            FieldType::str(),
            "Content of the user message.",
        ))
        .field(optional(
            "no_result_message",
            FieldType::str(),
            "Reply used when no chunk clears the score threshold.",
        ))
        .field(optional(
            "only_include_docs_used",
            FieldType::bool(),
            "Only return the chunks cited by the completion. Defaults to false.",
        ))
        .field(optional(
            "page_size",
            count(),
            "Chunks to fetch for retrieval. Zero skips the search.",
        ))
        .field(optional(
            "score_threshold",
            number(),
            "Chunks scoring below this are dropped before reranking.",
        ))
        .field(optional(
            "search_query",
            FieldType::str(),
            "Query used for retrieval instead of the last user message.",
        ))
        .field(optional(
            "search_type",
            FieldType::enumeration("SearchMethod", SEARCH_METHODS),
            "Retrieval method.",
        ))
        .field(optional(
            "sort_options",
            FieldType::record(sort_options()),
            "Re-ordering of retrieved chunks.",
        ))
        .field(
            FieldSpec::required("topic_id", FieldType::str())
                .describe("ID of the topic to attach the message to."),
        )
        .field(optional(
            "use_group_search",
            FieldType::bool(),
            "Search over groups instead of chunks. Defaults to false.",
        ))
        .field(optional(
            "user_id",
            FieldType::str(),
            "ID of the requesting user, for analytics.",
        ))
        .build()
        .expect("CreateMessageReqPayload schema")
});

pub fn create_message_req_payload() -> &'static Arc<RecordSchema> {
    &CREATE_MESSAGE_REQ_PAYLOAD
}
