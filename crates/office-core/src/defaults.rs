//! Centralized default constants for cdk-office.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Environment overrides are read by [`crate::config::OfficeConfig`].

// =============================================================================
// DATABASE
// =============================================================================

/// Default PostgreSQL connection string.
pub const DATABASE_URL: &str = "postgres://localhost/office";

/// Pool size. The workflow holds a connection only for one fetch or save.
pub const DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Seconds to wait for a free pooled connection.
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// STORAGE
// =============================================================================

/// Root directory that relative document paths resolve against.
pub const FILE_STORAGE_PATH: &str = "/var/lib/office/files";

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Dify API base URL.
pub const DIFY_BASE_URL: &str = "http://localhost/v1";

/// Timeout for completion requests in seconds.
pub const DIFY_TIMEOUT_SECS: u64 = 30;

/// Tags used when the model reply cannot be parsed as a JSON array.
pub const FALLBACK_TAGS: [&str; 2] = ["document", "ai_processed"];

/// Upper bound on summary length requested from the model (words).
pub const SUMMARY_MAX_WORDS: usize = 200;

/// Categories suggested to the classifier. Answers are not restricted to these.
pub const SUGGESTED_CATEGORIES: [&str; 5] = [
    "technical_document",
    "business_document",
    "legal_document",
    "personal_document",
    "other",
];

// =============================================================================
// EXTRACTION
// =============================================================================

/// Per-command timeout for external extraction tools (seconds).
pub const EXTRACTION_CMD_TIMEOUT_SECS: u64 = 60;

/// Tesseract language set.
pub const OCR_LANGUAGE: &str = "chi_sim+eng";

/// Rendering resolution for PDF pages sent to OCR.
pub const OCR_DPI: u32 = 300;
