//! Classify, tag and summarize.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use office_core::logging::SUBSYSTEM_JOBS;
use office_core::{
    AnnotationResult, Classifier, Document, ProcessContext, Result, Summarizer, TagExtractor,
};

/// How the three annotation calls are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnnotationMode {
    /// classify, then tag, then summarize.
    #[default]
    Sequential,
    /// All three concurrently; the first failure aborts the others.
    Parallel,
}

/// Produces an [`AnnotationResult`] or nothing.
///
/// Any failed call fails the whole step and completed calls are discarded.
/// Nothing is retried here.
pub struct AnnotationPipeline {
    classifier: Arc<dyn Classifier>,
    tag_extractor: Arc<dyn TagExtractor>,
    summarizer: Arc<dyn Summarizer>,
    mode: AnnotationMode,
}

impl AnnotationPipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        tag_extractor: Arc<dyn TagExtractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            classifier,
            tag_extractor,
            summarizer,
            mode: AnnotationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: AnnotationMode) -> Self {
        self.mode = mode;
        self
    }

    pub async fn annotate(
        &self,
        ctx: &ProcessContext,
        text: &str,
        document: &Document,
    ) -> Result<AnnotationResult> {
        let start = Instant::now();

        let (classification, tags, summary) = match self.mode {
            AnnotationMode::Sequential => {
                let classification = self.classifier.classify(ctx, text, document).await?;
                let tags = self.tag_extractor.extract_tags(ctx, text, document).await?;
                let summary = self.summarizer.summarize(ctx, text, document).await?;
                (classification, tags, summary)
            }
            AnnotationMode::Parallel => tokio::try_join!(
                self.classifier.classify(ctx, text, document),
                self.tag_extractor.extract_tags(ctx, text, document),
                self.summarizer.summarize(ctx, text, document),
            )?,
        };

        debug!(
            request_id = %ctx.request_id,
            subsystem = SUBSYSTEM_JOBS,
            component = "annotation",
            mode = ?self.mode,
            tag_count = tags.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Annotation complete"
        );

        Ok(AnnotationResult {
            classification,
            tags,
            summary,
        })
    }
}
