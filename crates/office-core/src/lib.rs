//! # office-core
//!
//! Core types, traits, and abstractions for the cdk-office document platform.
//!
//! This crate provides the foundational data structures and the collaborator
//! trait definitions that the database, inference and job crates depend on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use config::OfficeConfig;
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
