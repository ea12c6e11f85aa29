//! Extraction with optical fallback.

use std::sync::Arc;

use tracing::{debug, warn};

use office_core::logging::SUBSYSTEM_JOBS;
use office_core::{ContentExtractor, Document, OpticalExtractor, ProcessContext, Result};

/// Which extractor produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Primary,
    Optical,
}

/// Text handed to annotation, with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub source: TextSource,
}

/// Runs the primary extractor and falls back to OCR when it fails.
///
/// An empty primary result is a success and does not trigger the fallback.
/// When both fail the primary error is returned.
pub struct ExtractionSelector {
    primary: Arc<dyn ContentExtractor>,
    optical: Arc<dyn OpticalExtractor>,
}

impl ExtractionSelector {
    pub fn new(primary: Arc<dyn ContentExtractor>, optical: Arc<dyn OpticalExtractor>) -> Self {
        Self { primary, optical }
    }

    pub async fn select(&self, ctx: &ProcessContext, document: &Document) -> Result<ExtractedText> {
        let primary_err = match self.primary.extract_content(document).await {
            Ok(text) => {
                debug!(
                    request_id = %ctx.request_id,
                    subsystem = SUBSYSTEM_JOBS,
                    component = "extraction_selector",
                    text_len = text.len(),
                    "Primary extraction succeeded"
                );
                return Ok(ExtractedText {
                    text,
                    source: TextSource::Primary,
                });
            }
            Err(e) => e,
        };

        warn!(
            request_id = %ctx.request_id,
            subsystem = SUBSYSTEM_JOBS,
            component = "extraction_selector",
            document_id = %document.id,
            mime_type = %document.mime_type,
            error = %primary_err,
            "Primary extraction failed, trying OCR"
        );

        match self.optical.extract_optical_content(document).await {
            Ok(text) => Ok(ExtractedText {
                text,
                source: TextSource::Optical,
            }),
            Err(ocr_err) => {
                warn!(
                    request_id = %ctx.request_id,
                    subsystem = SUBSYSTEM_JOBS,
                    component = "extraction_selector",
                    document_id = %document.id,
                    error = %ocr_err,
                    "OCR extraction failed"
                );
                Err(primary_err)
            }
        }
    }
}
