//! Knowledge-base ingestion into a Dify dataset.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use office_core::logging::SUBSYSTEM_INFERENCE;
use office_core::{Document, Error, KnowledgeBase, OfficeConfig, ProcessContext, Result};

use crate::dify::{post_json, DifyConfig};

/// Render the indexed text for a processed document.
///
/// `document` is the updated snapshot, so `tags` holds the encoded tag list
/// and `description` the generated summary.
pub fn knowledge_entry(document: &Document, text: &str) -> String {
    format!(
        "Title: {}\nContent: {}\nTags: {}\nSummary: {}",
        document.title, text, document.tags, document.description
    )
}

#[derive(Debug, Serialize)]
struct ProcessRule {
    mode: &'static str,
}

#[derive(Debug, Serialize)]
struct CreateByTextRequest<'a> {
    name: &'a str,
    text: String,
    indexing_technique: &'static str,
    process_rule: ProcessRule,
}

/// Knowledge base backed by a Dify dataset.
///
/// Without a dataset id the ingestor only logs the entry it would have sent.
pub struct DifyKnowledgeBase {
    client: Client,
    config: DifyConfig,
    dataset_id: Option<String>,
}

impl DifyKnowledgeBase {
    pub fn new(config: DifyConfig, dataset_id: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config,
            dataset_id,
        })
    }

    pub fn from_config(config: &OfficeConfig) -> Result<Self> {
        Self::new(DifyConfig::from(config), config.dify_dataset_id.clone())
    }

    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }
}

#[async_trait]
impl KnowledgeBase for DifyKnowledgeBase {
    async fn ingest(&self, ctx: &ProcessContext, document: &Document, text: &str) -> Result<()> {
        let entry = knowledge_entry(document, text);

        let Some(dataset_id) = self.dataset_id.as_deref() else {
            info!(
                request_id = %ctx.request_id,
                subsystem = SUBSYSTEM_INFERENCE,
                component = "knowledge_base",
                document_id = %document.id,
                text_len = entry.len(),
                "No dataset configured, skipping knowledge base ingestion"
            );
            return Ok(());
        };

        let body = CreateByTextRequest {
            name: &document.title,
            text: entry,
            indexing_technique: "high_quality",
            process_rule: ProcessRule { mode: "automatic" },
        };

        let endpoint = format!("/datasets/{}/document/create_by_text", dataset_id);
        let response = post_json(&self.client, &self.config, &endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Knowledge base request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "Knowledge base returned {}: {}",
                status, text
            )));
        }

        debug!(
            request_id = %ctx.request_id,
            subsystem = SUBSYSTEM_INFERENCE,
            component = "knowledge_base",
            document_id = %document.id,
            dataset_id = %dataset_id,
            "Document ingested into knowledge base"
        );
        Ok(())
    }
}
