//! File-backed content extractor dispatching to adapters by MIME type.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use office_core::logging::SUBSYSTEM_JOBS;
use office_core::{ContentExtractor, Document, OfficeConfig, Result};

use crate::adapters::{
    locate_file, ExtractionAdapter, GenericDescriptorAdapter, HtmlTextAdapter,
    OfficeConvertAdapter, PdfTextAdapter, PlainTextAdapter,
};

/// Primary extractor: reads the stored file and picks an adapter by MIME type.
///
/// Types without a registered adapter are described by
/// [`GenericDescriptorAdapter`] instead of failing.
pub struct FileContentExtractor {
    storage_root: PathBuf,
    adapters: HashMap<String, Arc<dyn ExtractionAdapter>>,
    fallback: Arc<dyn ExtractionAdapter>,
}

impl FileContentExtractor {
    /// Create an extractor with no adapters besides the descriptor fallback.
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            adapters: HashMap::new(),
            fallback: Arc::new(GenericDescriptorAdapter),
        }
    }

    /// Create an extractor with every built-in adapter registered.
    pub fn with_defaults(storage_root: impl Into<PathBuf>, cmd_timeout_secs: u64) -> Self {
        let mut extractor = Self::new(storage_root);
        extractor.register(Arc::new(PlainTextAdapter));
        extractor.register(Arc::new(HtmlTextAdapter));
        extractor.register(Arc::new(PdfTextAdapter::new(cmd_timeout_secs)));
        extractor.register(Arc::new(OfficeConvertAdapter::new(cmd_timeout_secs)));
        extractor
    }

    pub fn from_config(config: &OfficeConfig) -> Self {
        Self::with_defaults(&config.storage_path, config.extraction_cmd_timeout_secs)
    }

    /// Register an adapter for each of its MIME types, replacing earlier ones.
    pub fn register(&mut self, adapter: Arc<dyn ExtractionAdapter>) {
        for mime in adapter.mime_types() {
            self.adapters.insert(mime.to_string(), adapter.clone());
        }
    }

    /// Adapter used for `mime_type` (case-insensitive).
    pub fn adapter_for(&self, mime_type: &str) -> &Arc<dyn ExtractionAdapter> {
        self.adapters
            .get(&mime_type.to_lowercase())
            .unwrap_or(&self.fallback)
    }
}

#[async_trait]
impl ContentExtractor for FileContentExtractor {
    async fn extract_content(&self, document: &Document) -> Result<String> {
        let start = Instant::now();
        let path = locate_file(&self.storage_root, document).await?;
        let adapter = self.adapter_for(&document.mime_type);
        let text = adapter.extract(&path, document).await?;

        debug!(
            subsystem = SUBSYSTEM_JOBS,
            component = "content_extractor",
            document_id = %document.id,
            mime_type = %document.mime_type,
            adapter = adapter.name(),
            text_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Content extracted"
        );
        Ok(text)
    }
}
