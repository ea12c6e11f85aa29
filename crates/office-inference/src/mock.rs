//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use office_inference::mock::MockGenerationBackend;
//!
//! let backend = MockGenerationBackend::new()
//!     .with_response_containing("classify", "技术文档")
//!     .with_fixed_response("fallback answer");
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use office_core::{CompletionRequest, Error, GenerationBackend, Result};

/// Mock generation backend for testing.
#[derive(Clone, Default)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    /// (prompt fragment, reply) pairs, first match wins.
    fragment_responses: Vec<(String, String)>,
    /// Prompt fragments whose requests fail.
    failing_fragments: Vec<String>,
    default_response: String,
    fail_all: bool,
    latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            fragment_responses: Vec::new(),
            failing_fragments: Vec::new(),
            default_response: "Mock response".to_string(),
            fail_all: false,
            latency_ms: 0,
        }
    }
}

/// A recorded generation call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub query: String,
    pub user: String,
    pub timestamp: std::time::Instant,
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply used when no fragment mapping matches.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Reply with `output` whenever the prompt contains `fragment`.
    pub fn with_response_containing(
        mut self,
        fragment: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fragment_responses
            .push((fragment.into(), output.into()));
        self
    }

    /// Fail every request whose prompt contains `fragment`.
    pub fn with_failure_on(mut self, fragment: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .failing_fragments
            .push(fragment.into());
        self
    }

    /// Fail every request.
    pub fn with_failure(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_all = true;
        self
    }

    /// Set simulated latency for every request.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn clear_calls(&self) {
        self.calls().clear()
    }

    fn calls(&self) -> MutexGuard<'_, Vec<MockCall>> {
        self.call_log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, request: &CompletionRequest) -> Result<String> {
        self.calls().push(MockCall {
            query: request.query.clone(),
            user: request.user.clone(),
            timestamp: std::time::Instant::now(),
        });

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        let failing = self
            .config
            .failing_fragments
            .iter()
            .any(|f| request.query.contains(f.as_str()));
        if self.config.fail_all || failing {
            return Err(Error::Inference("simulated failure".to_string()));
        }

        let reply = self
            .config
            .fragment_responses
            .iter()
            .find(|(fragment, _)| request.query.contains(fragment.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| self.config.default_response.clone());
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
