//! Page Templates
//!
//! askama templates under `templates/`. The page embeds chart configs as JSON
//! for the small script that hands them to Chart.js.

use askama::Template;

use crate::dashboard::{DashboardView, LotCard};
use crate::renderer::{ModalView, PageState};
use crate::theme::Theme;

/// Whole dashboard page
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub theme: Theme,
    pub next_theme: Theme,
    pub view: Option<&'a DashboardView>,
    pub overall_chart_json: Option<&'a str>,
    pub modal: &'a ModalView,
    pub modal_chart_json: Option<&'a str>,
    /// Why the shown data may be stale
    pub last_error: Option<&'a str>,
    pub refresh_secs: u64,
}

impl<'a> DashboardTemplate<'a> {
    pub fn new(page: &'a PageState, refresh_secs: u64) -> Self {
        Self {
            theme: page.theme,
            next_theme: page.theme.toggled(),
            view: page.view.as_ref(),
            overall_chart_json: page.overall_chart_json.as_deref(),
            modal: &page.modal,
            modal_chart_json: page.modal.chart_json.as_deref(),
            last_error: page.status.last_error.as_deref(),
            refresh_secs,
        }
    }
}

/// One lot card, the same markup the page repeats per lot
#[derive(Template)]
#[template(path = "card.html")]
pub struct ParkingCardTemplate<'a> {
    pub card: &'a LotCard,
}

/// Markup for a single lot card
pub fn create_parking_card(card: &LotCard) -> Result<String, askama::Error> {
    ParkingCardTemplate { card }.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParkingLot, Route, SnapshotResponse};
    use crate::renderer::{HistoryModal, RefreshStatus};

    fn card(lot: ParkingLot, theme: Theme) -> LotCard {
        LotCard::from_lot(&lot, theme)
    }

    #[test]
    fn test_card_markup() {
        let lot = ParkingLot::new("p<1>", "Temple & Market", Route::Nagercoil, 90, 100)
            .occupancy(90.0)
            .links("https://maps.example/p1", "#");
        let html = create_parking_card(&card(lot, Theme::Dark)).unwrap();

        assert!(html.contains("Temple &amp; Market"));
        assert!(html.contains("Occupancy: 90/100"));
        assert!(html.contains("bg-danger"));
        assert!(html.contains("width: 90%"));
        assert!(html.contains("btn-outline-light"));
        assert!(html.contains("status-available"));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("lot=p%3C1%3E"));
        assert!(!html.contains("p<1>"));
    }

    #[test]
    fn test_closed_card() {
        let lot = ParkingLot::new("p2", "Bus Stand", Route::Tirunelveli, 10, 100)
            .occupancy(10.0)
            .available(false);
        let html = create_parking_card(&card(lot, Theme::Light)).unwrap();

        assert!(html.contains("Closed"));
        assert!(html.contains("status-unavailable"));
        assert!(html.contains("bg-success"));
        assert!(html.contains("btn-outline-secondary"));
    }

    #[test]
    fn test_page_has_dom_contract() {
        let snapshot = SnapshotResponse {
            last_updated: "2026-10-16 15:04:00".to_string(),
            data: vec![
                ParkingLot::new("a", "A", Route::Thoothukudi, 50, 100).occupancy(50.0),
                ParkingLot::new("b", "B", Route::Thoothukudi, 90, 100).occupancy(90.0),
            ],
        };
        let page = PageState {
            theme: Theme::Dark,
            view: Some(DashboardView::build(&snapshot, Theme::Dark)),
            overall_chart_json: None,
            modal: HistoryModal::new().view(),
            status: RefreshStatus::default(),
        };
        let html = DashboardTemplate::new(&page, 60).render().unwrap();

        for id in [
            "thoothukudi-lots-container",
            "tirunelveli-lots-container",
            "nagercoil-lots-container",
            "overall-progress-bar",
            "total-vehicles",
            "total-capacity",
            "last-updated",
            "thoothukudi-route-progress",
            "thoothukudi-route-count",
            "theme-toggle-switch",
            "lotHistoryModal",
            "lotHistoryModalLabel",
            "singleLotChart",
            "modal-loading-text",
            "overallHistoryChart",
        ] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }

        assert!(html.contains("data-bs-theme=\"dark\""));
        assert!(html.contains("140 / 200"));
        assert!(html.contains("Oct 16, 2026, 3:04 PM"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_page_before_first_fetch() {
        let page = PageState {
            theme: Theme::Light,
            view: None,
            overall_chart_json: None,
            modal: HistoryModal::new().view(),
            status: RefreshStatus {
                last_success: None,
                last_error: Some("Upstream unavailable".to_string()),
            },
        };
        let html = DashboardTemplate::new(&page, 60).render().unwrap();

        assert!(html.contains("data-bs-theme=\"light\""));
        assert!(html.contains("Upstream unavailable"));
        assert!(html.contains("id=\"thoothukudi-lots-container\""));
    }
}
