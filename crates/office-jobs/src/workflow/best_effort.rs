//! Non-fatal steps that run after the document is saved.
//!
//! Failures are logged at ERROR and swallowed; the returned message only
//! feeds [`WorkflowOutcome`](super::WorkflowOutcome).

use tracing::{debug, error};

use office_core::logging::SUBSYSTEM_JOBS;
use office_core::{Document, KnowledgeBase, Notifier, ProcessContext};

/// Index the document and its text. Returns the failure message, if any.
pub async fn ingest_best_effort(
    knowledge_base: &dyn KnowledgeBase,
    ctx: &ProcessContext,
    document: &Document,
    text: &str,
) -> Option<String> {
    match knowledge_base.ingest(ctx, document, text).await {
        Ok(()) => {
            debug!(request_id = %ctx.request_id, document_id = %document.id, "Knowledge base updated");
            None
        }
        Err(e) => {
            error!(
                request_id = %ctx.request_id,
                subsystem = SUBSYSTEM_JOBS,
                component = "knowledge_base",
                document_id = %document.id,
                error = %e,
                "Failed to ingest document into knowledge base"
            );
            Some(e.to_string())
        }
    }
}

/// Notify interested parties. Returns the failure message, if any.
pub async fn notify_best_effort(
    notifier: &dyn Notifier,
    ctx: &ProcessContext,
    document: &Document,
) -> Option<String> {
    match notifier.notify(ctx, document).await {
        Ok(()) => None,
        Err(e) => {
            error!(
                request_id = %ctx.request_id,
                subsystem = SUBSYSTEM_JOBS,
                component = "notifier",
                document_id = %document.id,
                error = %e,
                "Failed to notify users"
            );
            Some(e.to_string())
        }
    }
}
