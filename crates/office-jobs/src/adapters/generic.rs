//! Descriptor fallback for media types without a text extractor.

use std::path::Path;

use async_trait::async_trait;

use office_core::{Document, Result};

use super::ExtractionAdapter;

/// Describes the file from its metadata instead of reading it.
pub struct GenericDescriptorAdapter;

pub fn describe(document: &Document) -> String {
    format!(
        "File: {}\nSize: {} bytes\nMIME Type: {}\n",
        document.title, document.file_size, document.mime_type
    )
}

#[async_trait]
impl ExtractionAdapter for GenericDescriptorAdapter {
    fn name(&self) -> &str {
        "generic"
    }

    fn mime_types(&self) -> &[&'static str] {
        &[]
    }

    async fn extract(&self, _path: &Path, document: &Document) -> Result<String> {
        Ok(describe(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let mut doc = Document::new("doc-1", "设计图", "a.png", "image/png", "u1");
        doc.file_size = 1024;
        assert_eq!(
            describe(&doc),
            "File: 设计图\nSize: 1024 bytes\nMIME Type: image/png\n"
        );
    }
}
