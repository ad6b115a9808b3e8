//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::DashboardConfig;
use crate::sheets::RecordStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where records are read from and appended to
    pub store: Arc<dyn RecordStore>,
    /// Page headings
    pub dashboard: Arc<DashboardConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, dashboard: DashboardConfig) -> Self {
        Self {
            store,
            dashboard: Arc::new(dashboard),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
