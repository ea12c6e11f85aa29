//! PdfText adapter: extracts the text layer of a PDF with `pdftotext` (poppler-utils).

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use office_core::defaults::EXTRACTION_CMD_TIMEOUT_SECS;
use office_core::{Document, Error, Result};

use super::command::run_cmd_with_timeout;
use super::ExtractionAdapter;

/// Adapter for the text layer of PDF files.
///
/// Scanned PDFs without a text layer come back as (near) empty text; that is
/// still a success, OCR only runs when this adapter fails outright.
pub struct PdfTextAdapter {
    timeout_secs: u64,
}

impl PdfTextAdapter {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Default for PdfTextAdapter {
    fn default() -> Self {
        Self::new(EXTRACTION_CMD_TIMEOUT_SECS)
    }
}

/// Reject files without the `%PDF` magic before shelling out.
async fn check_pdf_header(path: &Path) -> Result<()> {
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path).await?;
    let mut magic = [0u8; 4];
    let n = file.read(&mut magic).await?;
    if n < 4 || &magic != b"%PDF" {
        return Err(Error::Extraction(format!(
            "'{}' is not a valid PDF (missing %PDF header)",
            path.display()
        )));
    }
    Ok(())
}

#[async_trait]
impl ExtractionAdapter for PdfTextAdapter {
    fn name(&self) -> &str {
        "pdf_text"
    }

    fn mime_types(&self) -> &[&'static str] {
        &["application/pdf"]
    }

    async fn extract(&self, path: &Path, document: &Document) -> Result<String> {
        check_pdf_header(path).await?;

        let text = run_cmd_with_timeout(
            Command::new("pdftotext").arg(path).arg("-"),
            self.timeout_secs,
        )
        .await?;

        debug!(
            document_id = %document.id,
            text_len = text.len(),
            "pdftotext finished"
        );
        Ok(text)
    }
}
