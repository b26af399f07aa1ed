//! Route and Network Aggregation
//!
//! Totals are recomputed from scratch for every snapshot and thrown away
//! after the view is built.

use serde::Serialize;

use super::occupancy::occupancy_percent;
use crate::model::{ParkingLot, Route, RouteTag};

/// Sum of vehicles and capacity over a set of lots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RouteAggregate {
    pub current: u64,
    pub capacity: u64,
}

impl RouteAggregate {
    pub fn add(&mut self, lot: &ParkingLot) {
        self.current += lot.current_vehicle_count;
        self.capacity += lot.total_capacity;
    }

    /// Occupancy of the group, 0 when there is no capacity
    pub fn percent(&self) -> f64 {
        occupancy_percent(self.current, self.capacity)
    }

    /// `current / capacity`
    pub fn count_text(&self) -> String {
        format!("{} / {}", self.current, self.capacity)
    }
}

/// Totals for one snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Aggregation {
    /// Every lot, routed or not
    pub overall: RouteAggregate,
    /// Indexed by [`Route::index`]
    pub routes: [RouteAggregate; 3],
    /// Ids of lots whose route matched no known group
    pub unrouted: Vec<String>,
}

impl Aggregation {
    pub fn route(&self, route: Route) -> &RouteAggregate {
        &self.routes[route.index()]
    }
}

/// Accumulate global and per-route totals in one pass
pub fn aggregate(lots: &[ParkingLot]) -> Aggregation {
    let mut result = Aggregation::default();

    for lot in lots {
        result.overall.add(lot);

        match &lot.route {
            RouteTag::Known(route) => result.routes[route.index()].add(lot),
            RouteTag::Unrecognized(name) => {
                tracing::debug!(
                    "Lot {} has unrecognized route {:?}, counted in overall total only",
                    lot.id,
                    name
                );
                result.unrouted.push(lot.id.clone());
            }
            RouteTag::Missing => {
                tracing::debug!("Lot {} has no route, counted in overall total only", lot.id);
                result.unrouted.push(lot.id.clone());
            }
        }
    }

    result
}

/// Lots of one route, most occupied first. Ties keep upstream order.
pub fn lots_for_route(lots: &[ParkingLot], route: Route) -> Vec<&ParkingLot> {
    let mut selected: Vec<&ParkingLot> = lots
        .iter()
        .filter(|lot| lot.known_route() == Some(route))
        .collect();

    selected.sort_by(|a, b| b.occupancy_percent.total_cmp(&a.occupancy_percent));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(id: &str, route: &str, current: u64, total: u64, occupancy: f64) -> ParkingLot {
        ParkingLot::new(id, id, RouteTag::from(route.to_string()), current, total)
            .occupancy(occupancy)
    }

    #[test]
    fn test_route_totals_scenario() {
        let lots = vec![
            lot("a", "Thoothukudi", 50, 100, 50.0),
            lot("b", "Thoothukudi", 90, 100, 90.0),
        ];

        let agg = aggregate(&lots);
        let route = agg.route(Route::Thoothukudi);
        assert_eq!(route.count_text(), "140 / 200");
        assert_eq!(route.percent(), 70.0);
        assert_eq!(agg.route(Route::Nagercoil).count_text(), "0 / 0");
        assert_eq!(agg.route(Route::Nagercoil).percent(), 0.0);

        let ordered: Vec<&str> = lots_for_route(&lots, Route::Thoothukudi)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ordered, vec!["b", "a"]);
    }

    #[test]
    fn test_unrecognized_route_counts_globally_only() {
        let lots = vec![
            lot("a", "Tirunelveli", 10, 20, 50.0),
            lot("v", "VIP", 5, 10, 50.0),
        ];

        let agg = aggregate(&lots);
        assert_eq!(agg.overall, RouteAggregate { current: 15, capacity: 30 });
        assert_eq!(agg.route(Route::Tirunelveli).current, 10);
        let routed: u64 = agg.routes.iter().map(|r| r.current).sum();
        assert_eq!(routed, 10);
        assert_eq!(agg.unrouted, vec!["v".to_string()]);
    }

    #[test]
    fn test_missing_route_counts_globally_only() {
        let mut unassigned = lot("m", "Nagercoil", 7, 10, 70.0);
        unassigned.route = RouteTag::Missing;
        let lots = vec![lot("a", "Nagercoil", 3, 10, 30.0), unassigned];

        let agg = aggregate(&lots);
        assert_eq!(agg.overall, RouteAggregate { current: 10, capacity: 20 });
        assert_eq!(agg.route(Route::Nagercoil).current, 3);
        assert_eq!(agg.unrouted, vec!["m".to_string()]);
        assert_eq!(lots_for_route(&lots, Route::Nagercoil).len(), 1);
    }

    #[test]
    fn test_overall_percent_exact() {
        let lots = vec![
            lot("a", "Nagercoil", 1, 3, 33.3),
            lot("b", "Thoothukudi", 1, 4, 25.0),
        ];
        let agg = aggregate(&lots);
        assert_eq!(agg.overall.percent(), 2.0 / 7.0 * 100.0);
    }

    #[test]
    fn test_zero_capacity_is_zero_percent() {
        let lots = vec![lot("a", "Nagercoil", 0, 0, 0.0), lot("b", "Other", 3, 0, 0.0)];
        let agg = aggregate(&lots);
        assert_eq!(agg.overall.percent(), 0.0);
        assert!(agg.overall.percent().is_finite());
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let lots = vec![
            lot("first", "Nagercoil", 5, 10, 50.0),
            lot("top", "Nagercoil", 9, 10, 90.0),
            lot("second", "Nagercoil", 5, 10, 50.0),
        ];

        let ordered: Vec<&str> = lots_for_route(&lots, Route::Nagercoil)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ordered, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let agg = aggregate(&[]);
        assert_eq!(agg.overall, RouteAggregate::default());
        assert!(agg.unrouted.is_empty());
    }
}
