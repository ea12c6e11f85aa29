//! Structured logging schema and field name constants for cdk-office.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Workflow stage failed, or a best-effort step was swallowed |
//! | WARN  | Recoverable issue, automatic fallback applied (OCR, tag parsing) |
//! | INFO  | Workflow start/finish, pool creation |
//! | DEBUG | Stage transitions, request sizes, config choices |
//! | TRACE | Per-page OCR output, raw model replies |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across workflow → collaborator calls.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "extraction_selector", "annotation", "result_applier", "dify"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "process_document", "classify", "save"
pub const OPERATION: &str = "op";

// ─── Subsystem values ──────────────────────────────────────────────────────

pub const SUBSYSTEM_JOBS: &str = "jobs";
pub const SUBSYSTEM_DB: &str = "database";
pub const SUBSYSTEM_INFERENCE: &str = "inference";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Document ID being operated on.
pub const DOCUMENT_ID: &str = "document_id";

/// Workflow stage name.
pub const STAGE: &str = "stage";

/// Media type of the document file.
pub const MIME_TYPE: &str = "mime_type";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of extracted text.
pub const TEXT_LEN: &str = "text_len";

/// Number of tags produced.
pub const TAG_COUNT: &str = "tag_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
