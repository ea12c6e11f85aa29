//! LLM document summarizer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use office_core::defaults::SUMMARY_MAX_WORDS;
use office_core::logging::SUBSYSTEM_INFERENCE;
use office_core::{CompletionRequest, Document, GenerationBackend, ProcessContext, Result, Summarizer};

pub fn summary_prompt(title: &str, text: &str) -> String {
    format!(
        "Please generate a concise summary of the following document content. \
         The summary should be no more than {} words.\n\n\
         Document title: {}\n\nDocument content:\n{}",
        SUMMARY_MAX_WORDS, title, text
    )
}

/// Summarizer backed by a generation backend.
pub struct LlmSummarizer {
    backend: Arc<dyn GenerationBackend>,
}

impl LlmSummarizer {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(
        &self,
        ctx: &ProcessContext,
        text: &str,
        document: &Document,
    ) -> Result<String> {
        let request = CompletionRequest::new(summary_prompt(&document.title, text), &ctx.user);
        let summary = self.backend.generate(&request).await?.trim().to_string();

        debug!(
            request_id = %ctx.request_id,
            subsystem = SUBSYSTEM_INFERENCE,
            component = "summarizer",
            model = self.backend.model_name(),
            document_id = %document.id,
            response_len = summary.len(),
            "Summary generated"
        );
        Ok(summary)
    }
}
