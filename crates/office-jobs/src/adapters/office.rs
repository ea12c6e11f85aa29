//! OfficeConvert adapter: Word documents to plain text.
//!
//! `.docx` goes through `pandoc`, legacy `.doc` through `antiword`.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use office_core::defaults::EXTRACTION_CMD_TIMEOUT_SECS;
use office_core::{Document, Error, Result};

use super::command::run_cmd_with_timeout;
use super::ExtractionAdapter;

pub const MIME_MSWORD: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub struct OfficeConvertAdapter {
    timeout_secs: u64,
}

impl OfficeConvertAdapter {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Default for OfficeConvertAdapter {
    fn default() -> Self {
        Self::new(EXTRACTION_CMD_TIMEOUT_SECS)
    }
}

/// Build the converter command for a Word MIME type.
fn converter(mime_type: &str, path: &Path) -> Option<Command> {
    match mime_type {
        MIME_DOCX => {
            let mut cmd = Command::new("pandoc");
            cmd.arg("-f")
                .arg("docx")
                .arg("-t")
                .arg("plain")
                .arg("--wrap=none")
                .arg(path);
            Some(cmd)
        }
        MIME_MSWORD => {
            let mut cmd = Command::new("antiword");
            cmd.arg("-w").arg("0").arg(path);
            Some(cmd)
        }
        _ => None,
    }
}

#[async_trait]
impl ExtractionAdapter for OfficeConvertAdapter {
    fn name(&self) -> &str {
        "office_convert"
    }

    fn mime_types(&self) -> &[&'static str] {
        &[MIME_MSWORD, MIME_DOCX]
    }

    async fn extract(&self, path: &Path, document: &Document) -> Result<String> {
        let mime_type = document.mime_type.to_lowercase();
        let mut cmd = converter(&mime_type, path).ok_or_else(|| {
            Error::Extraction(format!("No office converter for {}", document.mime_type))
        })?;
        run_cmd_with_timeout(&mut cmd, self.timeout_secs).await
    }
}
