//! The document AI-processing workflow.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, instrument};

use office_core::logging::SUBSYSTEM_JOBS;
use office_core::{
    Classifier, ContentExtractor, Document, DocumentRepository, Error, KnowledgeBase,
    LogNotifier, Notifier, OpticalExtractor, ProcessContext, Result, Summarizer, TagExtractor,
};

use super::annotate::{AnnotationMode, AnnotationPipeline};
use super::apply::ResultApplier;
use super::best_effort::{ingest_best_effort, notify_best_effort};
use super::error::{FailedStage, ProcessError};
use super::selector::{ExtractionSelector, TextSource};

/// Result of a successful run, including the non-fatal failures the caller
/// does not otherwise see.
#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    /// The saved snapshot.
    pub document: Document,
    pub text_source: TextSource,
    pub indexing_error: Option<String>,
    pub notification_error: Option<String>,
}

impl WorkflowOutcome {
    /// True when indexing and notification also succeeded.
    pub fn is_complete(&self) -> bool {
        self.indexing_error.is_none() && self.notification_error.is_none()
    }
}

/// Extract → annotate → persist → (index, notify).
///
/// Only the first three stages can fail a run. Every run starts from
/// extraction again; nothing is checkpointed between runs.
pub struct DocumentWorkflow {
    selector: ExtractionSelector,
    pipeline: AnnotationPipeline,
    applier: ResultApplier,
    knowledge_base: Arc<dyn KnowledgeBase>,
    notifier: Arc<dyn Notifier>,
}

impl DocumentWorkflow {
    pub fn builder() -> DocumentWorkflowBuilder {
        DocumentWorkflowBuilder::default()
    }

    /// Process `document` and return the updated snapshot.
    ///
    /// `document` is never modified. On error nothing has been saved.
    pub async fn process_document(
        &self,
        ctx: &ProcessContext,
        document: &Document,
    ) -> std::result::Result<Document, ProcessError> {
        self.run(ctx, document).await.map(|outcome| outcome.document)
    }

    /// Like [`process_document`](Self::process_document) but also reports
    /// indexing and notification failures.
    #[instrument(skip_all, fields(
        subsystem = SUBSYSTEM_JOBS,
        op = "process_document",
        request_id = %ctx.request_id,
        document_id = %document.id,
    ))]
    pub async fn run(
        &self,
        ctx: &ProcessContext,
        document: &Document,
    ) -> std::result::Result<WorkflowOutcome, ProcessError> {
        let start = Instant::now();
        info!(mime_type = %document.mime_type, "Starting document processing");

        let extracted = self
            .selector
            .select(ctx, document)
            .await
            .map_err(|e| fail(FailedStage::Extraction, e))?;

        let annotation = self
            .pipeline
            .annotate(ctx, &extracted.text, document)
            .await
            .map_err(|e| fail(FailedStage::Annotation, e))?;

        let updated = self
            .applier
            .apply(document, &annotation)
            .await
            .map_err(|e| fail(FailedStage::Persistence, e))?;

        let indexing_error =
            ingest_best_effort(self.knowledge_base.as_ref(), ctx, &updated, &extracted.text).await;
        let notification_error = notify_best_effort(self.notifier.as_ref(), ctx, &updated).await;

        let outcome = WorkflowOutcome {
            document: updated,
            text_source: extracted.source,
            indexing_error,
            notification_error,
        };

        info!(
            text_source = ?outcome.text_source,
            category = %outcome.document.category,
            tag_count = annotation.tags.len(),
            indexed = outcome.indexing_error.is_none(),
            notified = outcome.notification_error.is_none(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Document processed successfully"
        );
        Ok(outcome)
    }
}

fn fail(stage: FailedStage, source: Error) -> ProcessError {
    error!(stage = %stage, error = %source, "Document processing failed");
    ProcessError::new(stage, source)
}

/// Constructor injection for [`DocumentWorkflow`].
#[derive(Default)]
pub struct DocumentWorkflowBuilder {
    content_extractor: Option<Arc<dyn ContentExtractor>>,
    optical_extractor: Option<Arc<dyn OpticalExtractor>>,
    classifier: Option<Arc<dyn Classifier>>,
    tag_extractor: Option<Arc<dyn TagExtractor>>,
    summarizer: Option<Arc<dyn Summarizer>>,
    repository: Option<Arc<dyn DocumentRepository>>,
    knowledge_base: Option<Arc<dyn KnowledgeBase>>,
    notifier: Option<Arc<dyn Notifier>>,
    annotation_mode: AnnotationMode,
}

impl DocumentWorkflowBuilder {
    pub fn content_extractor(mut self, extractor: Arc<dyn ContentExtractor>) -> Self {
        self.content_extractor = Some(extractor);
        self
    }

    pub fn optical_extractor(mut self, extractor: Arc<dyn OpticalExtractor>) -> Self {
        self.optical_extractor = Some(extractor);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn tag_extractor(mut self, tag_extractor: Arc<dyn TagExtractor>) -> Self {
        self.tag_extractor = Some(tag_extractor);
        self
    }

    pub fn summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn repository(mut self, repository: Arc<dyn DocumentRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn knowledge_base(mut self, knowledge_base: Arc<dyn KnowledgeBase>) -> Self {
        self.knowledge_base = Some(knowledge_base);
        self
    }

    /// Defaults to [`LogNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn annotation_mode(mut self, mode: AnnotationMode) -> Self {
        self.annotation_mode = mode;
        self
    }

    pub fn build(self) -> Result<DocumentWorkflow> {
        let selector = ExtractionSelector::new(
            required(self.content_extractor, "content extractor")?,
            required(self.optical_extractor, "optical extractor")?,
        );
        let pipeline = AnnotationPipeline::new(
            required(self.classifier, "classifier")?,
            required(self.tag_extractor, "tag extractor")?,
            required(self.summarizer, "summarizer")?,
        )
        .with_mode(self.annotation_mode);
        let applier = ResultApplier::new(required(self.repository, "document repository")?);

        Ok(DocumentWorkflow {
            selector,
            pipeline,
            applier,
            knowledge_base: required(self.knowledge_base, "knowledge base")?,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
        })
    }
}

fn required<T: ?Sized>(value: Option<Arc<T>>, name: &str) -> Result<Arc<T>> {
    value.ok_or_else(|| Error::Config(format!("DocumentWorkflow requires a {}", name)))
}
