//! # Parkwatch
//!
//! Parking occupancy dashboard: polls a parking-lot occupancy API and serves
//! a live page of lot cards, route totals and history charts.
//!
//! ## Modules
//!
//! - [`model`]: wire types for the occupancy API
//! - [`dashboard`]: color policy, aggregation and the page view model
//! - [`theme`]: light/dark preference and its persistence
//! - [`chart`]: Chart.js configuration and chart ownership
//! - [`client`]: upstream API client
//! - [`renderer`]: the stateful dashboard component and history modal
//! - [`scheduler`]: the snapshot and history polling loops
//! - [`server`]: HTTP surface with Axum and askama
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parkwatch::client::{ClientConfig, HttpParkingApi};
//! use parkwatch::renderer::DashboardRenderer;
//! use parkwatch::theme::{FileThemeStore, SystemPreference, ThemeController};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpParkingApi::new(ClientConfig::new("http://localhost:5000"))?);
//!     let theme = ThemeController::new(
//!         Box::new(FileThemeStore::new("theme.json")),
//!         SystemPreference::default(),
//!     );
//!
//!     let renderer = DashboardRenderer::new(api, theme);
//!     renderer.fetch_and_render_data().await?;
//!
//!     if let Some(view) = renderer.view().await {
//!         println!("{} / {} vehicles", view.total_vehicles, view.total_capacity);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod renderer;
pub mod scheduler;
pub mod server;
pub mod telemetry;
pub mod theme;

// Re-export top-level types for convenience
pub use client::{ClientConfig, ClientError, ClientResult, HttpParkingApi, ParkingApi};
pub use config::{Config, ConfigError};
pub use dashboard::{DashboardView, LotCard, OccupancyLevel, ProgressBar, RouteView};
pub use model::{LotHistory, OverallHistory, ParkingLot, Route, SnapshotResponse};
pub use renderer::{DashboardRenderer, HistoryModal, ModalState, PageState};
pub use scheduler::{RefreshIntervals, RefreshScheduler};
pub use server::{build_router, serve, AppState, ServerError};
pub use theme::{Theme, ThemeController, ThemeStore};
