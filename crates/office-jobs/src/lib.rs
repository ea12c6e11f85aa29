//! # office-jobs
//!
//! Document AI-processing workflow for cdk-office.
//!
//! This crate provides:
//! - Text extraction from stored files, with an OCR fallback
//! - The extract → annotate → persist → index workflow
//! - A job handler that runs the workflow for a document id
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use office_jobs::{setup, AnnotationMode, ProcessContext};
//! use office_db::{Database, DocumentRepository};
//!
//! let config = office_core::OfficeConfig::from_env()?;
//! let db = Database::from_config(&config).await?;
//! let repository = Arc::new(db.documents.clone());
//! let workflow = setup::workflow_from_config(&config, repository.clone(), AnnotationMode::Sequential)?;
//!
//! let doc = repository.fetch("doc-1").await?;
//! let updated = workflow.process_document(&ProcessContext::for_document(&doc), &doc).await?;
//! println!("{} -> {}", updated.id, updated.category);
//! ```

pub mod adapters;
pub mod document_handler;
pub mod extraction;
pub mod handler;
pub mod ocr;
pub mod setup;
pub mod workflow;

// Re-export core types
pub use office_core::*;

pub use document_handler::DocumentProcessingHandler;
pub use extraction::FileContentExtractor;
pub use handler::{Job, JobContext, JobHandler, JobResult, JobType};
pub use ocr::TesseractOcrExtractor;
pub use workflow::{
    AnnotationMode, DocumentWorkflow, DocumentWorkflowBuilder, FailedStage, ProcessError,
    WorkflowOutcome,
};
