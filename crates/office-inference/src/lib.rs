//! # office-inference
//!
//! Dify-backed AI annotation for cdk-office documents.
//!
//! This crate provides:
//! - A blocking completion client for the Dify application API
//! - LLM classifier, tag extractor and summarizer built on any generation backend
//! - Knowledge-base ingestion into a Dify dataset
//!
//! # Feature Flags
//!
//! - `mock`: Export the deterministic mock backend for downstream tests
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use office_inference::{DifyBackend, LlmSummarizer};
//! use office_core::{Document, ProcessContext, Summarizer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(DifyBackend::from_env().unwrap());
//!     let summarizer = LlmSummarizer::new(backend);
//!     let doc = Document::new("doc-1", "Report", "r.txt", "text/plain", "u1");
//!     let ctx = ProcessContext::for_document(&doc);
//!     let summary = summarizer.summarize(&ctx, "text", &doc).await.unwrap();
//!     println!("{}", summary);
//! }
//! ```

pub mod classifier;
pub mod dify;
pub mod knowledge;
pub mod summarizer;
pub mod tagging;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use office_core::*;

pub use classifier::LlmClassifier;
pub use dify::{DifyBackend, DifyConfig};
pub use knowledge::{knowledge_entry, DifyKnowledgeBase};
pub use summarizer::LlmSummarizer;
pub use tagging::{parse_tags, LlmTagExtractor};
