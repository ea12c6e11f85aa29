//! Document AI-processing workflow.
//!
//! ```text
//! ExtractionSelector ──► AnnotationPipeline ──► ResultApplier ──► knowledge base, notifier
//!   (primary, OCR)        (classify, tag,        (merge + save)     (best effort)
//!                          summarize)
//! ```

pub mod annotate;
pub mod apply;
pub mod best_effort;
pub mod error;
pub mod orchestrator;
pub mod selector;

pub use annotate::{AnnotationMode, AnnotationPipeline};
pub use apply::{merge, ResultApplier};
pub use best_effort::{ingest_best_effort, notify_best_effort};
pub use error::{FailedStage, ProcessError};
pub use orchestrator::{DocumentWorkflow, DocumentWorkflowBuilder, WorkflowOutcome};
pub use selector::{ExtractedText, ExtractionSelector, TextSource};
