//! Wiring of the production collaborators.

use std::sync::Arc;

use office_core::{DocumentRepository, GenerationBackend, OfficeConfig, Result};
use office_inference::{
    DifyBackend, DifyConfig, DifyKnowledgeBase, LlmClassifier, LlmSummarizer, LlmTagExtractor,
};

use crate::extraction::FileContentExtractor;
use crate::ocr::TesseractOcrExtractor;
use crate::workflow::{AnnotationMode, DocumentWorkflow};

/// Build a workflow backed by local extraction tools and the Dify service.
pub fn workflow_from_config(
    config: &OfficeConfig,
    repository: Arc<dyn DocumentRepository>,
    mode: AnnotationMode,
) -> Result<DocumentWorkflow> {
    let backend: Arc<dyn GenerationBackend> = Arc::new(DifyBackend::new(DifyConfig::from(config))?);

    DocumentWorkflow::builder()
        .content_extractor(Arc::new(FileContentExtractor::from_config(config)))
        .optical_extractor(Arc::new(TesseractOcrExtractor::from_config(config)))
        .classifier(Arc::new(LlmClassifier::new(backend.clone())))
        .tag_extractor(Arc::new(LlmTagExtractor::new(backend.clone())))
        .summarizer(Arc::new(LlmSummarizer::new(backend)))
        .repository(repository)
        .knowledge_base(Arc::new(DifyKnowledgeBase::from_config(config)?))
        .annotation_mode(mode)
        .build()
}
