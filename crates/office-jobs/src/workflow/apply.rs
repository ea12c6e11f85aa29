//! Merge an annotation into a document and persist it.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use office_core::logging::SUBSYSTEM_JOBS;
use office_core::{encode_tags, AnnotationResult, Document, DocumentRepository, Result};

/// Build the updated snapshot. `document` itself is left untouched.
///
/// description, category and tags are overwritten, tag order is kept as
/// produced, and `updated_at` is stamped with the current time.
pub fn merge(document: &Document, result: &AnnotationResult) -> Document {
    Document {
        description: result.summary.clone(),
        category: result.classification.clone(),
        tags: encode_tags(&result.tags),
        updated_at: Utc::now(),
        ..document.clone()
    }
}

pub struct ResultApplier {
    repository: Arc<dyn DocumentRepository>,
}

impl ResultApplier {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Merge and save in one write, returning the saved snapshot.
    pub async fn apply(&self, document: &Document, result: &AnnotationResult) -> Result<Document> {
        let updated = merge(document, result);
        self.repository.save(&updated).await?;
        debug!(
            subsystem = SUBSYSTEM_JOBS,
            component = "result_applier",
            document_id = %updated.id,
            "Annotated document saved"
        );
        Ok(updated)
    }
}
