//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | DATABASE_URL | postgres://localhost/office |
//! | DATABASE_MAX_CONNECTIONS | 5 |
//! | FILE_STORAGE_PATH | /var/lib/office/files |
//! | DIFY_BASE_URL | http://localhost/v1 |
//! | DIFY_API_KEY | (none) |
//! | DIFY_TIMEOUT | 30 |
//! | DIFY_DATASET_ID | (none, knowledge-base ingestion only logs) |
//! | OCR_LANGUAGE | chi_sim+eng |
//! | OCR_DPI | 300 |
//! | EXTRACTION_CMD_TIMEOUT | 60 |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::defaults;
use crate::error::{Error, Result};

/// Settings for the document workflow and its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub storage_path: PathBuf,
    pub dify_base_url: String,
    pub dify_api_key: Option<String>,
    pub dify_timeout_secs: u64,
    pub dify_dataset_id: Option<String>,
    pub ocr_language: String,
    pub ocr_dpi: u32,
    pub extraction_cmd_timeout_secs: u64,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_string(),
            database_max_connections: defaults::DATABASE_MAX_CONNECTIONS,
            storage_path: PathBuf::from(defaults::FILE_STORAGE_PATH),
            dify_base_url: defaults::DIFY_BASE_URL.to_string(),
            dify_api_key: None,
            dify_timeout_secs: defaults::DIFY_TIMEOUT_SECS,
            dify_dataset_id: None,
            ocr_language: defaults::OCR_LANGUAGE.to_string(),
            ocr_dpi: defaults::OCR_DPI,
            extraction_cmd_timeout_secs: defaults::EXTRACTION_CMD_TIMEOUT_SECS,
        }
    }
}

impl OfficeConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            database_url: non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                non_empty("DATABASE_MAX_CONNECTIONS"),
                defaults.database_max_connections,
            )?,
            storage_path: non_empty("FILE_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            dify_base_url: non_empty("DIFY_BASE_URL").unwrap_or(defaults.dify_base_url),
            dify_api_key: non_empty("DIFY_API_KEY"),
            dify_timeout_secs: parse_or(
                "DIFY_TIMEOUT",
                non_empty("DIFY_TIMEOUT"),
                defaults.dify_timeout_secs,
            )?,
            dify_dataset_id: non_empty("DIFY_DATASET_ID"),
            ocr_language: non_empty("OCR_LANGUAGE").unwrap_or(defaults.ocr_language),
            ocr_dpi: parse_or("OCR_DPI", non_empty("OCR_DPI"), defaults.ocr_dpi)?,
            extraction_cmd_timeout_secs: parse_or(
                "EXTRACTION_CMD_TIMEOUT",
                non_empty("EXTRACTION_CMD_TIMEOUT"),
                defaults.extraction_cmd_timeout_secs,
            )?,
        };
        config.validate()?;

        debug!(
            storage_path = %config.storage_path.display(),
            dify_base_url = %config.dify_base_url,
            dify_api_key = config.dify_api_key.is_some(),
            dify_dataset_id = config.dify_dataset_id.as_deref().unwrap_or("(none)"),
            "Loaded office configuration"
        );
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.dify_base_url.starts_with("http://") && !self.dify_base_url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "DIFY_BASE_URL must start with http:// or https://, got: {}",
                self.dify_base_url
            )));
        }
        if self.database_max_connections == 0 {
            return Err(Error::Config(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }
        if self.dify_timeout_secs == 0 {
            return Err(Error::Config("DIFY_TIMEOUT must be greater than 0".to_string()));
        }
        if self.extraction_cmd_timeout_secs == 0 {
            return Err(Error::Config(
                "EXTRACTION_CMD_TIMEOUT must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a number, got: {}", key, value))),
        None => Ok(default),
    }
}
