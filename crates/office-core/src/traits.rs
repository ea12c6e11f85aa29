//! Core traits for cdk-office abstractions.
//!
//! These traits define the collaborator seams of the document workflow.
//! Concrete implementations live in the db, inference and jobs crates;
//! tests substitute their own doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::logging;
use crate::models::Document;

// =============================================================================
// PROCESS CONTEXT
// =============================================================================

/// Per-invocation context forwarded into every collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessContext {
    /// Correlation ID (UUIDv7) for log aggregation across sub-calls.
    pub request_id: Uuid,
    /// End user the AI service attributes requests to.
    pub user: String,
}

impl ProcessContext {
    /// Create a context with a fresh request id.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            user: user.into(),
        }
    }

    /// Context attributed to the owner of `document`.
    pub fn for_document(document: &Document) -> Self {
        Self::new(document.owner_id.clone())
    }
}

// =============================================================================
// DOCUMENT REPOSITORY TRAITS
// =============================================================================

/// Repository for loading and persisting documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Fetch a document by ID.
    async fn fetch(&self, id: &str) -> Result<Document>;

    /// Persist the full document snapshot as a single atomic write.
    async fn save(&self, document: &Document) -> Result<()>;
}

// =============================================================================
// EXTRACTION TRAITS
// =============================================================================

/// Primary text extractor, dispatched on the document's media type.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract_content(&self, document: &Document) -> Result<String>;
}

/// Optical-recognition extractor used when primary extraction fails.
#[async_trait]
pub trait OpticalExtractor: Send + Sync {
    async fn extract_optical_content(&self, document: &Document) -> Result<String>;
}

// =============================================================================
// ANNOTATION TRAITS
// =============================================================================

/// Produces a single free-form category label.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, ctx: &ProcessContext, text: &str, document: &Document)
        -> Result<String>;
}

/// Produces an ordered, possibly empty, list of tags.
#[async_trait]
pub trait TagExtractor: Send + Sync {
    async fn extract_tags(
        &self,
        ctx: &ProcessContext,
        text: &str,
        document: &Document,
    ) -> Result<Vec<String>>;
}

/// Produces free-text summaries. Length policy belongs to the implementation.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, ctx: &ProcessContext, text: &str, document: &Document)
        -> Result<String>;
}

// =============================================================================
// KNOWLEDGE BASE / NOTIFICATION TRAITS
// =============================================================================

/// Retrieval store that indexes (document, extracted text) pairs.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn ingest(&self, ctx: &ProcessContext, document: &Document, text: &str) -> Result<()>;
}

/// Side-channel notification of parties interested in a processed document.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, ctx: &ProcessContext, document: &Document) -> Result<()>;
}

/// Notifier that records the event in the log without delivering anything.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, ctx: &ProcessContext, document: &Document) -> Result<()> {
        info!(
            request_id = %ctx.request_id,
            document_id = %document.id,
            owner_id = %document.owner_id,
            subsystem = logging::SUBSYSTEM_JOBS,
            "Would notify users about document processing"
        );
        Ok(())
    }
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// A single blocking completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Prompt text.
    pub query: String,
    /// Extra template inputs understood by the backend.
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub inputs: JsonValue,
    /// End user the request is attributed to.
    pub user: String,
}

impl CompletionRequest {
    pub fn new(query: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            inputs: JsonValue::Null,
            user: user.into(),
        }
    }
}

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run a completion and return the answer text.
    async fn generate(&self, request: &CompletionRequest) -> Result<String>;

    /// Get the model or application name being used.
    fn model_name(&self) -> &str;
}
