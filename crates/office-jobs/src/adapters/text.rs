//! Plain text adapter.

use std::path::Path;

use async_trait::async_trait;

use office_core::{Document, Result};

use super::ExtractionAdapter;

/// Reads the file as UTF-8, replacing invalid sequences.
pub struct PlainTextAdapter;

#[async_trait]
impl ExtractionAdapter for PlainTextAdapter {
    fn name(&self) -> &str {
        "plain_text"
    }

    fn mime_types(&self) -> &[&'static str] {
        &["text/plain"]
    }

    async fn extract(&self, path: &Path, _document: &Document) -> Result<String> {
        let data = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}
