//! Application State
//!
//! Shared state accessible by all handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::renderer::DashboardRenderer;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<DashboardRenderer>,
    /// Seconds between browser reloads of the page
    pub page_refresh_secs: u64,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(renderer: Arc<DashboardRenderer>, page_refresh_secs: u64) -> Self {
        Self {
            renderer,
            page_refresh_secs,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
