//! Occupancy Classification
//!
//! Color policy shared by lot cards, route bars and the overall bar.

use serde::Serialize;

/// Lower bound (exclusive) of the warning band
pub const WARNING_ABOVE: f64 = 50.0;

/// Lower bound (exclusive) of the danger band
pub const DANGER_ABOVE: f64 = 85.0;

/// Fill level of a lot, route or the whole network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyLevel {
    Success,
    Warning,
    Danger,
}

impl OccupancyLevel {
    /// Classify an occupancy percentage. Evaluated high to low.
    pub fn classify(percent: f64) -> Self {
        if percent > DANGER_ABOVE {
            OccupancyLevel::Danger
        } else if percent > WARNING_ABOVE {
            OccupancyLevel::Warning
        } else {
            OccupancyLevel::Success
        }
    }

    /// Bootstrap background class for progress bars
    pub fn css_class(&self) -> &'static str {
        match self {
            OccupancyLevel::Success => "bg-success",
            OccupancyLevel::Warning => "bg-warning",
            OccupancyLevel::Danger => "bg-danger",
        }
    }
}

/// `current / capacity * 100`, or 0 when there is no capacity
pub fn occupancy_percent(current: u64, capacity: u64) -> f64 {
    if capacity > 0 {
        current as f64 / capacity as f64 * 100.0
    } else {
        0.0
    }
}
