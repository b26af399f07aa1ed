//! Dashboard View Logic
//!
//! Pure functions from a snapshot (plus theme) to what the page displays:
//! - [`occupancy`]: the shared success/warning/danger color policy
//! - [`aggregate`]: overall and per-route totals
//! - [`view`]: cards, progress bars and the whole-page view model
//! - [`format`]: timestamps, counters and percent labels

pub mod aggregate;
pub mod format;
pub mod occupancy;
pub mod view;

pub use aggregate::{aggregate, lots_for_route, Aggregation, RouteAggregate};
pub use occupancy::{occupancy_percent, OccupancyLevel};
pub use view::{DashboardView, LotCard, ProgressBar, RouteView};
