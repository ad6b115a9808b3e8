//! # Maintlog
//!
//! Machine maintenance log dashboard. Records live in a remote spreadsheet
//! reached through its web-app endpoint; this crate lists them, charts them
//! and appends new ones after validation.
//!
//! ## Modules
//!
//! - [`records`]: Row types, option catalog and the submission form
//! - [`sheets`]: Spreadsheet backend client and the `RecordStore` seam
//! - [`report`]: Problem counts, SVG bar chart, CSV export
//! - [`web`]: Dashboard page and JSON API with Axum
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maintlog::records::{NewRecord, RecordForm};
//! use maintlog::sheets::{RecordStore, SheetsClient, SheetsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SheetsClient::new(SheetsConfig::new("https://script.google.com/macros/s/XXX/exec"))?;
//!
//!     let records = client.fetch_records().await?;
//!     println!("Found {} records", records.len());
//!
//!     let form = RecordForm {
//!         machine: "Oven A".to_string(),
//!         date: "2024-05-03".to_string(),
//!         start: "08:00".to_string(),
//!         end: "09:15".to_string(),
//!         ..Default::default()
//!     };
//!     client.append_record(&NewRecord::from_form(&form)?).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;
pub mod records;
pub mod report;
pub mod sheets;
pub mod web;

pub use config::{Config, ConfigError, LoggingConfig};

pub use records::{NewRecord, OptionCatalog, Record, RecordError, RecordForm, COLUMNS};

pub use report::{problem_counts, render_bar_chart_svg, records_to_csv, ExportFormat, ProblemCount};

pub use sheets::{MemoryStore, RecordStore, SheetsClient, SheetsConfig, SheetsError};

pub use web::{build_router, serve, ApiError, AppState};
