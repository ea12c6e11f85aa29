//! Dify application API backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use office_core::defaults;
use office_core::logging::SUBSYSTEM_INFERENCE;
use office_core::{CompletionRequest, Error, GenerationBackend, OfficeConfig, Result};

/// Name reported by [`GenerationBackend::model_name`].
pub const DIFY_APP_NAME: &str = "dify-completion";

/// Configuration for the Dify backend.
#[derive(Debug, Clone)]
pub struct DifyConfig {
    /// API root, e.g. `https://dify.example.com/v1`.
    pub base_url: String,
    /// Application API key sent as a bearer token.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for DifyConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DIFY_BASE_URL.to_string(),
            api_key: None,
            timeout_seconds: defaults::DIFY_TIMEOUT_SECS,
        }
    }
}

impl From<&OfficeConfig> for DifyConfig {
    fn from(config: &OfficeConfig) -> Self {
        Self {
            base_url: config.dify_base_url.clone(),
            api_key: config.dify_api_key.clone(),
            timeout_seconds: config.dify_timeout_secs,
        }
    }
}

/// Wire body of `POST /completion-messages`.
#[derive(Debug, Serialize)]
struct CompletionMessageRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "JsonValue::is_null")]
    inputs: &'a JsonValue,
    response_mode: &'static str,
    user: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    answer: String,
}

/// Generation backend that calls a Dify completion application.
pub struct DifyBackend {
    client: Client,
    config: DifyConfig,
}

impl DifyBackend {
    /// Create a new Dify backend with the given configuration.
    pub fn new(config: DifyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            warn!(
                subsystem = SUBSYSTEM_INFERENCE,
                base_url = %config.base_url,
                "Dify backend has no API key configured"
            );
        }
        info!(
            subsystem = SUBSYSTEM_INFERENCE,
            base_url = %config.base_url,
            timeout_secs = config.timeout_seconds,
            "Initializing Dify backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables (see [`OfficeConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        let config = OfficeConfig::from_env()?;
        Self::new(DifyConfig::from(&config))
    }

    /// Get the current configuration.
    pub fn config(&self) -> &DifyConfig {
        &self.config
    }

    /// Build an authenticated POST request against the API root.
    pub(crate) fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        post_json(&self.client, &self.config, endpoint)
    }
}

/// Authenticated JSON POST shared by the completion and dataset clients.
pub(crate) fn post_json(
    client: &Client,
    config: &DifyConfig,
    endpoint: &str,
) -> reqwest::RequestBuilder {
    let url = format!("{}{}", config.base_url.trim_end_matches('/'), endpoint);
    let mut req = client.post(&url);

    if let Some(ref api_key) = config.api_key {
        req = req.header("Authorization", format!("Bearer {}", api_key));
    }

    req.header("Content-Type", "application/json")
}

#[async_trait]
impl GenerationBackend for DifyBackend {
    async fn generate(&self, request: &CompletionRequest) -> Result<String> {
        let start = Instant::now();
        debug!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "dify",
            op = "completion",
            prompt_len = request.query.len(),
            "Sending completion request"
        );

        let body = CompletionMessageRequest {
            query: &request.query,
            inputs: &request.inputs,
            response_mode: "blocking",
            user: &request.user,
        };

        let response = self
            .post("/completion-messages")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Dify returned {}: {}",
                status, text
            )));
        }

        let result: CompletionMessageResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        debug!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "dify",
            op = "completion",
            response_len = result.answer.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Completion finished"
        );
        Ok(result.answer)
    }

    fn model_name(&self) -> &str {
        DIFY_APP_NAME
    }
}
