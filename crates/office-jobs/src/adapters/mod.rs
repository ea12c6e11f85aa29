//! Extraction adapter implementations.
//!
//! Each adapter turns one family of media types into plain text. The
//! [`FileContentExtractor`](crate::extraction::FileContentExtractor)
//! dispatches to them by the document's MIME type.

pub mod command;
pub mod generic;
pub mod html;
pub mod office;
pub mod pdf_text;
pub mod text;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use office_core::{Document, Error, Result};

pub use generic::GenericDescriptorAdapter;
pub use html::HtmlTextAdapter;
pub use office::OfficeConvertAdapter;
pub use pdf_text::PdfTextAdapter;
pub use text::PlainTextAdapter;

/// A text extractor for a fixed set of media types.
#[async_trait]
pub trait ExtractionAdapter: Send + Sync {
    /// Adapter name for logs.
    fn name(&self) -> &str;

    /// Lower-case MIME types this adapter is registered for.
    fn mime_types(&self) -> &[&'static str];

    /// Extract text from the file at `path`, which is known to exist.
    async fn extract(&self, path: &Path, document: &Document) -> Result<String>;
}

/// Resolve a stored file path against the storage root.
///
/// Absolute paths are used as-is.
pub fn resolve_path(storage_root: &Path, file_path: &str) -> PathBuf {
    let path = Path::new(file_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        storage_root.join(path)
    }
}

/// Resolve `document`'s file and check that it exists.
pub async fn locate_file(storage_root: &Path, document: &Document) -> Result<PathBuf> {
    let path = resolve_path(storage_root, &document.file_path);
    match tokio::fs::try_exists(&path).await {
        Ok(true) => Ok(path),
        Ok(false) => Err(Error::NotFound(format!("file not found: {}", path.display()))),
        Err(e) => Err(Error::Io(e)),
    }
}
