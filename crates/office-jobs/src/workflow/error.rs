//! Workflow failure type.

use std::fmt;

use office_core::Error;

/// Stage at which a workflow run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    /// Both the primary and the optical extractor failed.
    Extraction,
    /// Classification, tagging or summarization failed.
    Annotation,
    /// The updated document could not be saved.
    Persistence,
}

impl FailedStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailedStage::Extraction => "extraction",
            FailedStage::Annotation => "annotation",
            FailedStage::Persistence => "persistence",
        }
    }
}

impl fmt::Display for FailedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal workflow failure.
///
/// Renders as the fixed message `failed to process document`; the stage and
/// the underlying error are kept for logs.
#[derive(Debug, thiserror::Error)]
#[error("failed to process document")]
pub struct ProcessError {
    stage: FailedStage,
    source: Error,
}

impl ProcessError {
    pub fn new(stage: FailedStage, source: Error) -> Self {
        Self { stage, source }
    }

    pub fn stage(&self) -> FailedStage {
        self.stage
    }

    /// The collaborator error that ended the run.
    pub fn cause(&self) -> &Error {
        &self.source
    }
}
