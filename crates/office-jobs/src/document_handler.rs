//! DocumentProcessingHandler: load a document by id and run the workflow.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use office_core::{DocumentRepository, Error, ProcessContext};

use crate::handler::{JobContext, JobHandler, JobResult, JobType};
use crate::workflow::DocumentWorkflow;

pub struct DocumentProcessingHandler {
    repository: Arc<dyn DocumentRepository>,
    workflow: Arc<DocumentWorkflow>,
}

impl DocumentProcessingHandler {
    pub fn new(repository: Arc<dyn DocumentRepository>, workflow: Arc<DocumentWorkflow>) -> Self {
        Self {
            repository,
            workflow,
        }
    }
}

#[async_trait]
impl JobHandler for DocumentProcessingHandler {
    fn job_type(&self) -> JobType {
        JobType::DocumentProcessing
    }

    async fn execute(&self, ctx: JobContext) -> JobResult {
        // Payload: { "document_id": "..." }
        let document_id = match ctx
            .payload()
            .and_then(|p| p.get("document_id"))
            .and_then(|v| v.as_str())
        {
            Some(id) => id.to_string(),
            None => return JobResult::Failed("Missing document_id in job payload".into()),
        };

        ctx.report_progress(10, Some("Loading document"));

        let document = match self.repository.fetch(&document_id).await {
            Ok(doc) => doc,
            Err(e) => {
                error!(job_id = %ctx.job.id, document_id = %document_id, error = %e, "Failed to load document");
                let message = format!("Failed to load document {}: {}", document_id, e);
                // Only database errors are retryable.
                return match e {
                    Error::Database(_) => JobResult::Retry(message),
                    _ => JobResult::Failed(message),
                };
            }
        };

        ctx.report_progress(20, Some("Processing document"));

        let process_ctx = ProcessContext::for_document(&document);
        match self.workflow.run(&process_ctx, &document).await {
            Ok(outcome) => {
                info!(
                    job_id = %ctx.job.id,
                    request_id = %process_ctx.request_id,
                    document_id = %document_id,
                    "Document processing job completed"
                );
                ctx.report_progress(100, Some("Done"));
                JobResult::Success(Some(json!({
                    "document_id": document_id,
                    "category": outcome.document.category,
                    "tag_count": outcome.document.decoded_tags().map(|t| t.len()).unwrap_or(0),
                    "indexed": outcome.indexing_error.is_none(),
                    "notified": outcome.notification_error.is_none(),
                })))
            }
            Err(e) => JobResult::Failed(e.to_string()),
        }
    }
}
