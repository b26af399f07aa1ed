//! History Series Types
//!
//! Wire format of `GET /api/overall-history` and
//! `GET /api/parking-lot-history`. Series arrive already shaped for the
//! chart library; styling keys are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single (timestamp, value) sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// ISO 8601 timestamp
    pub x: String,
    pub y: f64,
}

/// One named, time-ordered series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    #[serde(default)]
    pub data: Vec<ChartPoint>,
    /// borderColor, fill, tension, pointRadius, ...
    #[serde(flatten)]
    pub style: Map<String, Value>,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, data: Vec<ChartPoint>) -> Self {
        Self {
            label: label.into(),
            data,
            style: Map::new(),
        }
    }

    /// Latest sample, if any
    pub fn last(&self) -> Option<&ChartPoint> {
        self.data.last()
    }
}

/// Response body of `GET /api/overall-history`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverallHistory {
    #[serde(default)]
    pub datasets: Vec<ChartSeries>,
}

/// Response body of `GET /api/parking-lot-history?id=...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotHistory {
    #[serde(rename = "lotName")]
    pub lot_name: String,
    #[serde(default)]
    pub datasets: Vec<ChartSeries>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_keeps_styling_keys() {
        let json = r#"{
            "label": "Thoothukudi Route Vehicle Count",
            "data": [{"x": "2026-10-16T10:00:00", "y": 12}],
            "borderColor": "rgba(29, 233, 182, 1)",
            "fill": false,
            "tension": 0.1,
            "pointRadius": 0
        }"#;

        let series: ChartSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.data.len(), 1);
        assert_eq!(series.style["borderColor"], "rgba(29, 233, 182, 1)");
        assert_eq!(series.style["pointRadius"], 0);

        let back = serde_json::to_value(&series).unwrap();
        assert_eq!(back["fill"], false);
        assert_eq!(back["data"][0]["y"], 12.0);
    }

    #[test]
    fn test_lot_history_field_names() {
        let json = r#"{"lotName": "Temple Car Park", "datasets": []}"#;
        let history: LotHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.lot_name, "Temple Car Park");
        assert!(history.datasets.is_empty());
    }
}
