//! Upstream Data Model
//!
//! Types for the three read-only endpoints of the occupancy API:
//! - `GET /api/parking-data` - current snapshot of all lots
//! - `GET /api/overall-history` - per-route vehicle counts over time
//! - `GET /api/parking-lot-history?id=` - occupancy history of one lot

mod history;
mod lot;
mod route;

pub use history::{ChartPoint, ChartSeries, LotHistory, OverallHistory};
pub use lot::{ParkingLot, SnapshotResponse};
pub use route::{Route, RouteTag, UnknownRoute};
