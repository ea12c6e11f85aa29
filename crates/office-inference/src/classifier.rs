//! LLM document classifier.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use office_core::defaults::SUGGESTED_CATEGORIES;
use office_core::logging::SUBSYSTEM_INFERENCE;
use office_core::{Classifier, CompletionRequest, Document, GenerationBackend, ProcessContext, Result};

/// Build the classification prompt for a document.
pub fn classification_prompt(title: &str, text: &str) -> String {
    format!(
        "Please classify the following document content into one of these categories: {}.\n\n\
         Document title: {}\n\nDocument content:\n{}",
        SUGGESTED_CATEGORIES.join(", "),
        title,
        text
    )
}

/// Classifier that asks a generation backend for a category label.
///
/// The suggested categories are a hint only; the trimmed answer is returned
/// as-is.
pub struct LlmClassifier {
    backend: Arc<dyn GenerationBackend>,
}

impl LlmClassifier {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(
        &self,
        ctx: &ProcessContext,
        text: &str,
        document: &Document,
    ) -> Result<String> {
        let start = Instant::now();
        let request = CompletionRequest::new(classification_prompt(&document.title, text), &ctx.user);
        let answer = self.backend.generate(&request).await?;
        let category = answer.trim().to_string();

        debug!(
            request_id = %ctx.request_id,
            subsystem = SUBSYSTEM_INFERENCE,
            component = "classifier",
            model = self.backend.model_name(),
            document_id = %document.id,
            category = %category,
            duration_ms = start.elapsed().as_millis() as u64,
            "Document classified"
        );
        Ok(category)
    }
}
