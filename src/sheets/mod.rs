//! Spreadsheet Backend
//!
//! The maintenance sheet is reached through a spreadsheet web-app endpoint
//! that understands three calls:
//!
//! - `GET  <url>?action=get_data`    - all rows
//! - `GET  <url>?action=get_options` - selectable values per category
//! - `POST <url>` with `{"action": "add_data", ...}` - append a row
//!
//! ## Architecture
//!
//! - **RecordStore**: the seam the dashboard talks to
//! - **SheetsClient**: reqwest implementation against the web app
//! - **MemoryStore**: in-process implementation for demos and tests

mod client;
mod memory;

pub use client::{SheetsClient, SheetsConfig, SheetsError};
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::records::{NewRecord, OptionCatalog, Record};

/// URL scheme that selects the in-process store
pub const MEMORY_URL: &str = "memory:";

/// Common trait for everything that can hold maintenance records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name for logs and health output
    fn name(&self) -> &str;

    /// All existing rows
    async fn fetch_records(&self) -> Result<Vec<Record>, SheetsError>;

    /// Selectable values for the entry form
    async fn fetch_options(&self) -> Result<OptionCatalog, SheetsError>;

    /// Append one validated record
    async fn append_record(&self, record: &NewRecord) -> Result<(), SheetsError>;

    /// Check that the backend answers
    async fn health_check(&self) -> Result<(), SheetsError>;
}

/// Reply to an `add_data` call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppendOutcome {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppendOutcome {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Turn a non-success reply into an error
    pub fn into_result(self) -> Result<(), SheetsError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(SheetsError::Rejected(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

/// Pick a store implementation from the configured backend URL
pub fn connect(config: SheetsConfig) -> Result<Arc<dyn RecordStore>, SheetsError> {
    if config.base_url.trim() == MEMORY_URL {
        tracing::info!("Using in-process record store");
        return Ok(Arc::new(MemoryStore::with_demo_data()));
    }
    Ok(Arc::new(SheetsClient::new(config)?))
}
