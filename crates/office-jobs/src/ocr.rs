//! Optical character recognition fallback using tesseract.
//!
//! Images are passed to `tesseract` directly. PDFs are rendered to PNG with
//! `pdftoppm` first and each page is recognized in order.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, trace};

use office_core::defaults::{EXTRACTION_CMD_TIMEOUT_SECS, OCR_DPI, OCR_LANGUAGE};
use office_core::logging::SUBSYSTEM_JOBS;
use office_core::{Document, Error, OfficeConfig, OpticalExtractor, Result};

use crate::adapters::command::{run_cmd_status, run_cmd_with_timeout};
use crate::adapters::locate_file;

/// Image types sent straight to tesseract.
pub const OCR_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/tiff",
    "image/bmp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OcrTarget {
    Image,
    Pdf,
}

fn ocr_target(mime_type: &str) -> Option<OcrTarget> {
    let mime = mime_type.to_lowercase();
    if OCR_IMAGE_TYPES.contains(&mime.as_str()) {
        Some(OcrTarget::Image)
    } else if mime == "application/pdf" {
        Some(OcrTarget::Pdf)
    } else {
        None
    }
}

pub struct TesseractOcrExtractor {
    storage_root: PathBuf,
    language: String,
    dpi: u32,
    timeout_secs: u64,
}

impl TesseractOcrExtractor {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            language: OCR_LANGUAGE.to_string(),
            dpi: OCR_DPI,
            timeout_secs: EXTRACTION_CMD_TIMEOUT_SECS,
        }
    }

    pub fn from_config(config: &OfficeConfig) -> Self {
        Self::new(&config.storage_path)
            .with_language(&config.ocr_language)
            .with_dpi(config.ocr_dpi)
            .with_timeout_secs(config.extraction_cmd_timeout_secs)
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Rendering is slower than recognition, so pdftoppm gets three times
    /// the per-command timeout.
    fn render_timeout_secs(&self) -> u64 {
        self.timeout_secs.saturating_mul(3)
    }

    async fn recognize_image(&self, image: &Path) -> Result<String> {
        run_cmd_with_timeout(
            Command::new("tesseract")
                .arg(image)
                .arg("stdout")
                .arg("-l")
                .arg(&self.language),
            self.timeout_secs,
        )
        .await
    }

    async fn recognize_pdf(&self, pdf: &Path, document: &Document) -> Result<String> {
        let img_dir = TempDir::new()?;
        let img_prefix = img_dir.path().join("page");

        run_cmd_status(
            Command::new("pdftoppm")
                .arg("-png")
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg(pdf)
                .arg(&img_prefix),
            self.render_timeout_secs(),
        )
        .await?;

        // pdftoppm zero-pads page numbers, so name order is page order.
        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(img_dir.path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("png") {
                pages.push(path);
            }
        }
        pages.sort();

        if pages.is_empty() {
            return Err(Error::Extraction(format!(
                "No pages rendered from PDF {}",
                pdf.display()
            )));
        }

        debug!(
            subsystem = SUBSYSTEM_JOBS,
            component = "ocr",
            document_id = %document.id,
            pages = pages.len(),
            dpi = self.dpi,
            "OCRing rendered pages"
        );

        let mut texts = Vec::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            let text = self.recognize_image(page).await?;
            trace!(document_id = %document.id, page = i + 1, text_len = text.len(), "Page recognized");
            texts.push(text);
        }
        Ok(texts.join("\n"))
    }
}

#[async_trait]
impl OpticalExtractor for TesseractOcrExtractor {
    async fn extract_optical_content(&self, document: &Document) -> Result<String> {
        let start = Instant::now();
        let path = locate_file(&self.storage_root, document).await?;

        let text = match ocr_target(&document.mime_type) {
            Some(OcrTarget::Image) => self.recognize_image(&path).await?,
            Some(OcrTarget::Pdf) => self.recognize_pdf(&path, document).await?,
            None => {
                return Err(Error::Extraction(format!(
                    "OCR not applicable for file type: {}",
                    document.mime_type
                )))
            }
        };

        debug!(
            subsystem = SUBSYSTEM_JOBS,
            component = "ocr",
            document_id = %document.id,
            language = %self.language,
            text_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "OCR finished"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_targets() {
        assert_eq!(ocr_target("image/jpeg"), Some(OcrTarget::Image));
        assert_eq!(ocr_target("IMAGE/PNG"), Some(OcrTarget::Image));
        assert_eq!(ocr_target("image/bmp"), Some(OcrTarget::Image));
        assert_eq!(ocr_target("application/pdf"), Some(OcrTarget::Pdf));
        assert_eq!(ocr_target("text/plain"), None);
        assert_eq!(ocr_target("image/webp"), None);
    }

    #[test]
    fn test_render_timeout_saturates() {
        let ocr = TesseractOcrExtractor::new("/srv").with_timeout_secs(20);
        assert_eq!(ocr.render_timeout_secs(), 60);
        let ocr = ocr.with_timeout_secs(u64::MAX - 1);
        assert_eq!(ocr.render_timeout_secs(), u64::MAX);
    }

    #[test]
    fn test_from_config() {
        let config = OfficeConfig {
            ocr_language: "eng".to_string(),
            ocr_dpi: 150,
            extraction_cmd_timeout_secs: 9,
            ..OfficeConfig::default()
        };
        let ocr = TesseractOcrExtractor::from_config(&config);
        assert_eq!(ocr.language, "eng");
        assert_eq!(ocr.dpi, 150);
        assert_eq!(ocr.timeout_secs, 9);
        assert_eq!(ocr.storage_root, config.storage_path);
    }

    #[tokio::test]
    async fn test_not_applicable_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "a,b").unwrap();
        let doc = Document::new("doc-1", "t", "a.csv", "text/csv", "u1");

        let err = TesseractOcrExtractor::new(dir.path())
            .extract_optical_content(&doc)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Extraction error: OCR not applicable for file type: text/csv"
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::new("doc-1", "t", "scan.png", "image/png", "u1");
        let err = TesseractOcrExtractor::new(dir.path())
            .extract_optical_content(&doc)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
