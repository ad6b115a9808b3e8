//! Spreadsheet Web-App Client
//!
//! HTTP client for the spreadsheet web-app endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::{AppendOutcome, RecordStore};
use crate::records::{NewRecord, OptionCatalog, Record};

/// Spreadsheet web-app client
pub struct SheetsClient {
    client: Client,
    config: SheetsConfig,
}

/// Configuration for the web-app client
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Web-app URL (the `/exec` endpoint)
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            base_url: super::MEMORY_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl SheetsConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

impl SheetsClient {
    /// Create a new client with the given configuration
    pub fn new(config: SheetsConfig) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    /// `GET <url>?action=<action>` and decode the JSON body
    async fn get_action(&self, action: &str) -> Result<Value, SheetsError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("action", action)])
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(classify)?;
        serde_json::from_str(&body).map_err(|e| SheetsError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for SheetsClient {
    fn name(&self) -> &str {
        "sheets"
    }

    async fn fetch_records(&self) -> Result<Vec<Record>, SheetsError> {
        let body = self.get_action("get_data").await?;

        let rows = match body {
            Value::Array(rows) => rows,
            other => {
                tracing::warn!(body = %other, "get_data did not return a list, treating as empty");
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match Record::from_row(row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(index, error = %e, "Skipping malformed row"),
            }
        }

        tracing::debug!(count = records.len(), "Fetched records");
        Ok(records)
    }

    async fn fetch_options(&self) -> Result<OptionCatalog, SheetsError> {
        let body = self.get_action("get_options").await?;
        if !body.is_object() {
            return Err(SheetsError::Decode(
                "get_options did not return an object".to_string(),
            ));
        }
        Ok(OptionCatalog::from_json(&body))
    }

    async fn append_record(&self, record: &NewRecord) -> Result<(), SheetsError> {
        let response = self
            .client
            .post(&self.config.base_url)
            .json(&record.to_payload())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(classify)?;
        let outcome: AppendOutcome =
            serde_json::from_str(&body).map_err(|e| SheetsError::Decode(e.to_string()))?;

        outcome.into_result()?;
        tracing::info!(machine = %record.machine, date = %record.date, "Record appended");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), SheetsError> {
        self.get_action("get_options").await.map(|_| ())
    }
}

fn classify(e: reqwest::Error) -> SheetsError {
    if e.is_timeout() {
        SheetsError::Timeout
    } else if e.is_connect() {
        SheetsError::Unavailable
    } else {
        SheetsError::Request(e)
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the spreadsheet backend
#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response from backend: {0}")]
    Decode(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Backend rejected the request: {0}")]
    Rejected(String),
}
