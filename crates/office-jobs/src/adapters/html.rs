//! HTML adapter. Concatenates every text node of the parsed document.

use std::path::Path;

use async_trait::async_trait;
use scraper::Html;

use office_core::{Document, Result};

use super::ExtractionAdapter;

pub struct HtmlTextAdapter;

/// Concatenate all text nodes in document order, markup dropped.
pub fn html_text(source: &str) -> String {
    Html::parse_document(source).root_element().text().collect()
}

#[async_trait]
impl ExtractionAdapter for HtmlTextAdapter {
    fn name(&self) -> &str {
        "html_text"
    }

    fn mime_types(&self) -> &[&'static str] {
        &["text/html"]
    }

    async fn extract(&self, path: &Path, _document: &Document) -> Result<String> {
        let data = tokio::fs::read(path).await?;
        Ok(html_text(&String::from_utf8_lossy(&data)))
    }
}
