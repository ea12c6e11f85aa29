//! LLM tag extraction and reply parsing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use office_core::defaults::FALLBACK_TAGS;
use office_core::logging::SUBSYSTEM_INFERENCE;
use office_core::{
    CompletionRequest, Document, GenerationBackend, ProcessContext, Result, TagExtractor,
};

pub fn tags_prompt(title: &str, text: &str) -> String {
    format!(
        "Please extract relevant tags from the following document content. \
         Return the tags as a JSON array of strings.\n\n\
         Document title: {}\n\nDocument content:\n{}",
        title, text
    )
}

/// Parse a model reply as a JSON array of strings.
///
/// Accepts the array bare or wrapped in a Markdown code fence. Returns `None`
/// when the reply is anything else.
pub fn parse_tags(reply: &str) -> Option<Vec<String>> {
    let body = strip_code_fence(reply.trim());
    serde_json::from_str::<Vec<String>>(body).ok()
}

fn strip_code_fence(reply: &str) -> &str {
    let Some(rest) = reply.strip_prefix("```") else {
        return reply;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

fn fallback_tags() -> Vec<String> {
    FALLBACK_TAGS.iter().map(|t| t.to_string()).collect()
}

/// Tag extractor backed by a generation backend.
///
/// An unparseable reply yields the fixed fallback tags rather than an error;
/// only a failed backend call is reported as a failure.
pub struct LlmTagExtractor {
    backend: Arc<dyn GenerationBackend>,
}

impl LlmTagExtractor {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl TagExtractor for LlmTagExtractor {
    async fn extract_tags(
        &self,
        ctx: &ProcessContext,
        text: &str,
        document: &Document,
    ) -> Result<Vec<String>> {
        let request = CompletionRequest::new(tags_prompt(&document.title, text), &ctx.user);
        let reply = self.backend.generate(&request).await?;
        trace!(request_id = %ctx.request_id, reply = %reply, "Raw tag reply");

        let tags = match parse_tags(&reply) {
            Some(tags) => tags,
            None => {
                warn!(
                    request_id = %ctx.request_id,
                    subsystem = SUBSYSTEM_INFERENCE,
                    component = "tagging",
                    document_id = %document.id,
                    response_len = reply.len(),
                    "Tag reply is not a JSON string array, using fallback tags"
                );
                fallback_tags()
            }
        };

        debug!(
            request_id = %ctx.request_id,
            subsystem = SUBSYSTEM_INFERENCE,
            component = "tagging",
            model = self.backend.model_name(),
            document_id = %document.id,
            tag_count = tags.len(),
            "Tags extracted"
        );
        Ok(tags)
    }
}
