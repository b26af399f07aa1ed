//! Parking Lot Snapshot Types
//!
//! Wire format of `GET /api/parking-data`.

use serde::{Deserialize, Serialize};

use super::route::{Route, RouteTag};

/// One monitored parking facility, as reported by the upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    #[serde(rename = "ParkingLotID")]
    pub id: String,

    #[serde(rename = "Parking_name_en")]
    pub name_en: String,

    #[serde(rename = "Route_en", default)]
    pub route: RouteTag,

    #[serde(rename = "Current_Vehicle")]
    pub current_vehicle_count: u64,

    #[serde(rename = "TotalCapacity")]
    pub total_capacity: u64,

    /// 0-100, computed upstream
    #[serde(rename = "Occupancy_Percent")]
    pub occupancy_percent: f64,

    #[serde(rename = "IsParkingAvailable")]
    pub is_available: bool,

    #[serde(rename = "Location_Link", default = "default_link")]
    pub location_link: String,

    #[serde(rename = "Photos_Link", default = "default_link")]
    pub photos_link: String,
}

fn default_link() -> String {
    "#".to_string()
}

impl ParkingLot {
    /// Create a lot with placeholder links
    pub fn new(
        id: impl Into<String>,
        name_en: impl Into<String>,
        route: impl Into<RouteTag>,
        current_vehicle_count: u64,
        total_capacity: u64,
    ) -> Self {
        let occupancy_percent = if total_capacity > 0 {
            current_vehicle_count as f64 / total_capacity as f64 * 100.0
        } else {
            0.0
        };

        Self {
            id: id.into(),
            name_en: name_en.into(),
            route: route.into(),
            current_vehicle_count,
            total_capacity,
            occupancy_percent,
            is_available: true,
            location_link: default_link(),
            photos_link: default_link(),
        }
    }

    /// Override the upstream occupancy value
    pub fn occupancy(mut self, percent: f64) -> Self {
        self.occupancy_percent = percent;
        self
    }

    /// Set the availability flag
    pub fn available(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    /// Set location and photo links
    pub fn links(mut self, location: impl Into<String>, photos: impl Into<String>) -> Self {
        self.location_link = location.into();
        self.photos_link = photos.into();
        self
    }

    /// Known route this lot belongs to
    pub fn known_route(&self) -> Option<Route> {
        self.route.route()
    }
}

/// Response body of `GET /api/parking-data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub last_updated: String,
    #[serde(default)]
    pub data: Vec<ParkingLot>,
}
