//! Charts
//!
//! Chart drawing is delegated to Chart.js in the browser. This module builds
//! the configuration it is given and owns the resulting chart instances.

pub mod config;
pub mod options;
pub mod slot;

pub use config::{ChartConfig, ChartKind, RenderedChart};
pub use options::{chart_options, single_lot_chart_options, ChartOptions, ChartPalette};
pub use slot::{ChartInstance, ChartSlot};

/// Canvas of the aggregate history chart
pub const OVERALL_CANVAS_ID: &str = "overallHistoryChart";

/// Canvas inside the lot history modal
pub const SINGLE_LOT_CANVAS_ID: &str = "singleLotChart";
