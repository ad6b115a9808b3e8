//! Data Transfer Objects
//!
//! Request and response types for the JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::records::Record;
use crate::report::ProblemCount;

// ============================================
// RECORD DTOs
// ============================================

/// List records response
#[derive(Debug, Serialize)]
pub struct RecordListResponse {
    pub records: Vec<Record>,
    pub total: usize,
}

/// Append record response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRecordResponse {
    /// Status: "success"
    pub status: String,
}

/// Problem chart data
#[derive(Debug, Serialize)]
pub struct ProblemSummaryResponse {
    /// Counts, most frequent first
    pub problems: Vec<ProblemCount>,
    /// Number of records counted
    pub total_records: usize,
}

// ============================================
// PAGE DTOs
// ============================================

/// Query parameters of the dashboard page
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// Set after a successful submission redirect
    #[serde(default)]
    pub added: Option<String>,
}

impl DashboardParams {
    /// Any non-empty value other than "0" counts as set
    pub fn added(&self) -> bool {
        matches!(self.added.as_deref().map(str::trim), Some(flag) if !flag.is_empty() && flag != "0")
    }
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Format: csv, json
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Backend name
    pub backend: String,
    /// Backend status: ok, error
    pub backend_status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
