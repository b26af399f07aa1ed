//! Dashboard View Model
//!
//! Everything the page shows, derived from one snapshot and the current
//! theme. A view is built whole and replaced whole, so the three route
//! groups and the totals always come from the same fetch.

use serde::Serialize;

use super::aggregate::{aggregate, lots_for_route, RouteAggregate};
use super::format::{format_count, format_last_updated, format_percent_label, format_width};
use super::occupancy::OccupancyLevel;
use crate::model::{ParkingLot, Route, SnapshotResponse};
use crate::theme::Theme;

/// A filled bar with its color class and label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressBar {
    pub percent: f64,
    /// CSS width, unrounded
    pub width: String,
    /// Rounded percentage text
    pub label: String,
    /// `None` for bars outside the threshold policy
    pub level: Option<OccupancyLevel>,
}

impl ProgressBar {
    /// Bar colored by the shared threshold policy
    pub fn classified(percent: f64) -> Self {
        Self {
            level: Some(OccupancyLevel::classify(percent)),
            ..Self::plain(percent)
        }
    }

    /// Bar without a threshold color (the overall bar keeps its own styling)
    fn plain(percent: f64) -> Self {
        Self {
            percent,
            width: format_width(percent),
            label: format_percent_label(percent),
            level: None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        self.level.map(|level| level.css_class()).unwrap_or("")
    }
}

/// Display fragment for one lot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotCard {
    pub id: String,
    pub name: String,
    /// `Occupancy: 42/120`
    pub occupancy_text: String,
    pub available: bool,
    pub status_text: &'static str,
    pub status_class: &'static str,
    pub progress: ProgressBar,
    pub location_link: String,
    pub photos_link: String,
    pub button_class: &'static str,
}

impl LotCard {
    /// Map one lot to its card
    pub fn from_lot(lot: &ParkingLot, theme: Theme) -> Self {
        let (status_text, status_class) = if lot.is_available {
            ("Available", "status-available")
        } else {
            ("Closed", "status-unavailable")
        };

        Self {
            id: lot.id.clone(),
            name: lot.name_en.clone(),
            occupancy_text: format!(
                "Occupancy: {}/{}",
                lot.current_vehicle_count, lot.total_capacity
            ),
            available: lot.is_available,
            status_text,
            status_class,
            progress: ProgressBar::classified(lot.occupancy_percent),
            location_link: lot.location_link.clone(),
            photos_link: lot.photos_link.clone(),
            button_class: button_class(theme),
        }
    }
}

/// Outline button style for the current theme
pub fn button_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "btn-outline-light",
        Theme::Light => "btn-outline-secondary",
    }
}

/// One route group: its bar, counter and sorted cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView {
    pub route: Route,
    pub name: &'static str,
    pub dom_prefix: &'static str,
    pub totals: RouteAggregate,
    /// `current / capacity`
    pub count_text: String,
    pub progress: ProgressBar,
    pub cards: Vec<LotCard>,
}

/// Whole-page view model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub last_updated: String,
    pub totals: RouteAggregate,
    pub total_vehicles: String,
    pub total_capacity: String,
    pub overall: ProgressBar,
    pub routes: Vec<RouteView>,
    /// Lots with a route outside the known groups
    pub unrouted: Vec<String>,
    pub theme: Theme,
}

impl DashboardView {
    /// Build the full view from one snapshot
    pub fn build(snapshot: &SnapshotResponse, theme: Theme) -> Self {
        let lots = &snapshot.data;
        let agg = aggregate(lots);

        let routes = Route::ALL
            .iter()
            .map(|&route| {
                let totals = *agg.route(route);
                RouteView {
                    route,
                    name: route.as_str(),
                    dom_prefix: route.dom_prefix(),
                    totals,
                    count_text: totals.count_text(),
                    progress: ProgressBar::classified(totals.percent()),
                    cards: lots_for_route(lots, route)
                        .into_iter()
                        .map(|lot| LotCard::from_lot(lot, theme))
                        .collect(),
                }
            })
            .collect();

        Self {
            last_updated: format_last_updated(&snapshot.last_updated),
            totals: agg.overall,
            total_vehicles: format_count(agg.overall.current),
            total_capacity: format_count(agg.overall.capacity),
            overall: ProgressBar::plain(agg.overall.percent()),
            routes,
            unrouted: agg.unrouted,
            theme,
        }
    }

    pub fn route(&self, route: Route) -> &RouteView {
        &self.routes[route.index()]
    }

    /// Total number of cards across the three groups
    pub fn card_count(&self) -> usize {
        self.routes.iter().map(|r| r.cards.len()).sum()
    }
}
