//! Dashboard Renderer
//!
//! The one stateful component: owns the theme, the latest rendered view and
//! the aggregate history chart. Lot history modals belong to the request
//! that opened them.
//!
//! Fetches never hold a lock across the network call. Responses are applied
//! in completion order, so when two requests for the same endpoint overlap
//! the one that finishes last wins.

pub mod modal;

pub use modal::{HistoryModal, ModalState, ModalView};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::chart::{chart_options, ChartConfig, ChartSlot, RenderedChart, OVERALL_CANVAS_ID};
use crate::client::{ClientResult, ParkingApi};
use crate::dashboard::DashboardView;
use crate::model::{ChartSeries, SnapshotResponse};
use crate::theme::{AppliedTheme, Theme, ThemeController};

/// Latest applied snapshot and the view built from it
#[derive(Debug, Clone)]
struct Rendered {
    snapshot: SnapshotResponse,
    view: DashboardView,
    refreshed_at: DateTime<Utc>,
}

/// Outcome of the most recent refresh attempts
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshStatus {
    pub last_success: Option<DateTime<Utc>>,
    /// Set when the latest snapshot fetch failed, cleared on success
    pub last_error: Option<String>,
}

/// Everything needed to draw the page at one instant
#[derive(Debug, Clone, Serialize)]
pub struct PageState {
    pub theme: Theme,
    pub view: Option<DashboardView>,
    pub overall_chart_json: Option<String>,
    pub modal: ModalView,
    pub status: RefreshStatus,
}

/// The dashboard component
pub struct DashboardRenderer {
    api: Arc<dyn ParkingApi>,
    theme: Mutex<ThemeController>,
    rendered: RwLock<Option<Rendered>>,
    status: RwLock<RefreshStatus>,
    overall_chart: Mutex<ChartSlot<RenderedChart>>,
    chart_generation: AtomicU64,
}

impl DashboardRenderer {
    /// Create a renderer; the theme controller has already applied the
    /// preferred theme
    pub fn new(api: Arc<dyn ParkingApi>, theme: ThemeController) -> Self {
        tracing::info!("Dashboard theme: {}", theme.current());

        Self {
            api,
            theme: Mutex::new(theme),
            rendered: RwLock::new(None),
            status: RwLock::new(RefreshStatus::default()),
            overall_chart: Mutex::new(ChartSlot::new()),
            chart_generation: AtomicU64::new(0),
        }
    }

    pub async fn theme(&self) -> Theme {
        self.theme.lock().await.current()
    }

    /// Fetch the current snapshot and replace the view.
    ///
    /// On failure the previous view stays up and the error is recorded.
    pub async fn fetch_and_render_data(&self) -> ClientResult<()> {
        let snapshot = match self.api.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Snapshot refresh failed, keeping previous view: {}", e);
                self.status.write().await.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let now = Utc::now();
        {
            // Theme must be read under the view lock
            let mut rendered = self.rendered.write().await;
            let view = DashboardView::build(&snapshot, self.theme().await);

            tracing::info!(
                "Rendered {} lots ({} / {} vehicles, {} unrouted)",
                snapshot.data.len(),
                view.totals.current,
                view.totals.capacity,
                view.unrouted.len()
            );

            *rendered = Some(Rendered {
                snapshot,
                view,
                refreshed_at: now,
            });
        }

        let mut status = self.status.write().await;
        status.last_success = Some(now);
        status.last_error = None;

        Ok(())
    }

    /// Fetch aggregate history and rebuild its chart from scratch
    pub async fn fetch_and_render_overall_history(&self) -> ClientResult<()> {
        let history = match self.api.fetch_overall_history().await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Overall history refresh failed: {}", e);
                return Err(e);
            }
        };

        let theme = self.theme().await;
        self.render_overall_chart(history.datasets, theme).await;
        Ok(())
    }

    async fn render_overall_chart(&self, datasets: Vec<ChartSeries>, theme: Theme) {
        let generation = self.chart_generation.fetch_add(1, Ordering::Relaxed) + 1;
        let series_count = datasets.len();
        let config = ChartConfig::line(datasets, chart_options(theme));

        let mut slot = self.overall_chart.lock().await;
        match slot.try_replace_with(|| RenderedChart::new(OVERALL_CANVAS_ID, config, generation)) {
            Ok(_) => tracing::debug!(
                "Rebuilt overall history chart: {} series, generation {}",
                series_count,
                generation
            ),
            Err(e) => tracing::warn!("Could not build overall history chart: {}", e),
        }
    }

    /// Open a history modal for a lot and wait for its data.
    ///
    /// Each caller gets its own modal, so one visitor's page never closes or
    /// replaces another's.
    pub async fn open_lot_history(&self, lot_id: &str) -> ModalView {
        let mut modal = HistoryModal::new();
        modal.open(lot_id);

        let result = self.api.fetch_lot_history(lot_id).await;
        modal.complete(lot_id, result, self.theme().await);
        modal.view()
    }

    /// Apply, persist and re-render for a new theme.
    ///
    /// Charts cannot be recolored, so a drawn aggregate chart is torn down and
    /// rebuilt from its last data.
    pub async fn set_theme(&self, theme: Theme) -> AppliedTheme {
        let applied = self.theme.lock().await.set_theme(theme);
        self.rerender_for_theme(applied.theme).await;
        applied
    }

    /// Flip the theme
    pub async fn toggle_theme(&self) -> AppliedTheme {
        let next = self.theme().await.toggled();
        self.set_theme(next).await
    }

    async fn rerender_for_theme(&self, theme: Theme) {
        let cached = {
            let slot = self.overall_chart.lock().await;
            slot.get().map(|chart| chart.datasets().to_vec())
        };
        if let Some(datasets) = cached {
            self.render_overall_chart(datasets, theme).await;
        }

        let mut rendered = self.rendered.write().await;
        if let Some(rendered) = rendered.as_mut() {
            let theme = self.theme().await;
            rendered.view = DashboardView::build(&rendered.snapshot, theme);
        }
    }

    /// Current view model, if a snapshot has been applied
    pub async fn view(&self) -> Option<DashboardView> {
        self.rendered.read().await.as_ref().map(|r| r.view.clone())
    }

    /// When the displayed snapshot was applied
    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.rendered.read().await.as_ref().map(|r| r.refreshed_at)
    }

    pub async fn has_overall_chart(&self) -> bool {
        self.overall_chart.lock().await.is_rendered()
    }

    /// Consistent copy of everything the page shows, with the modal closed
    pub async fn page_state(&self) -> PageState {
        let theme = self.theme().await;
        let view = self.view().await;
        let overall_chart_json = self
            .overall_chart
            .lock()
            .await
            .get()
            .map(|chart| chart.json.clone());
        let modal = HistoryModal::new().view();
        let status = self.status.read().await.clone();

        PageState {
            theme,
            view,
            overall_chart_json,
            modal,
            status,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory upstream for renderer, scheduler and server tests.

    use super::*;
    use crate::client::ClientError;
    use crate::model::{LotHistory, OverallHistory};
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::oneshot;

    type HeldSnapshot = (SnapshotResponse, oneshot::Receiver<()>);

    #[derive(Default)]
    pub struct FakeApi {
        pub snapshot: std::sync::Mutex<Option<SnapshotResponse>>,
        pub overall: std::sync::Mutex<Option<OverallHistory>>,
        pub lots: std::sync::Mutex<HashMap<String, LotHistory>>,
        /// Served before `snapshot`, one per call, each once its sender fires
        pub held: std::sync::Mutex<VecDeque<HeldSnapshot>>,
        pub lot_delay: std::sync::Mutex<Option<Duration>>,
        pub snapshot_calls: AtomicUsize,
        pub history_calls: AtomicUsize,
    }

    impl FakeApi {
        pub fn set_snapshot(&self, snapshot: SnapshotResponse) {
            *self.snapshot.lock().unwrap() = Some(snapshot);
        }

        pub fn fail_snapshot(&self) {
            *self.snapshot.lock().unwrap() = None;
        }

        pub fn set_overall(&self, history: OverallHistory) {
            *self.overall.lock().unwrap() = Some(history);
        }

        pub fn add_lot(&self, id: &str, history: LotHistory) {
            self.lots.lock().unwrap().insert(id.to_string(), history);
        }

        /// Queue a snapshot that the next call waits on until released
        pub fn hold_snapshot(&self, snapshot: SnapshotResponse) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.held.lock().unwrap().push_back((snapshot, rx));
            tx
        }

        pub fn delay_lot_history(&self, delay: Duration) {
            *self.lot_delay.lock().unwrap() = Some(delay);
        }

        /// Wait until `count` snapshot requests have started
        pub async fn wait_for_snapshot_calls(&self, count: usize) {
            while self.snapshot_calls.load(Ordering::SeqCst) < count {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait]
    impl ParkingApi for FakeApi {
        async fn fetch_snapshot(&self) -> ClientResult<SnapshotResponse> {
            let held = self.held.lock().unwrap().pop_front();
            self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
            if let Some((snapshot, release)) = held {
                let _ = release.await;
                return Ok(snapshot);
            }

            self.snapshot
                .lock()
                .unwrap()
                .clone()
                .ok_or(ClientError::Unavailable)
        }

        async fn fetch_overall_history(&self) -> ClientResult<OverallHistory> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            self.overall
                .lock()
                .unwrap()
                .clone()
                .ok_or(ClientError::Unavailable)
        }

        async fn fetch_lot_history(&self, lot_id: &str) -> ClientResult<LotHistory> {
            let delay = *self.lot_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            self.lots
                .lock()
                .unwrap()
                .get(lot_id)
                .cloned()
                .ok_or_else(|| ClientError::Status {
                    status: 500,
                    message: "Could not process lot history".to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeApi;
    use super::*;
    use crate::model::{ChartPoint, LotHistory, OverallHistory, ParkingLot, Route};
    use crate::theme::{MemoryThemeStore, SystemPreference};

    fn renderer(api: Arc<FakeApi>, theme: Theme) -> DashboardRenderer {
        let controller = ThemeController::new(
            Box::new(MemoryThemeStore::with_theme(theme)),
            SystemPreference::default(),
        );
        DashboardRenderer::new(api, controller)
    }

    fn snapshot(lots: Vec<ParkingLot>) -> SnapshotResponse {
        SnapshotResponse {
            last_updated: "2026-10-16 12:00:00".to_string(),
            data: lots,
        }
    }

    fn overall() -> OverallHistory {
        OverallHistory {
            datasets: Route::ALL
                .iter()
                .map(|route| {
                    ChartSeries::new(
                        format!("{} Route Vehicle Count", route),
                        vec![ChartPoint {
                            x: "2026-10-16T11:00:00".to_string(),
                            y: 10.0,
                        }],
                    )
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_fetch_renders_view() {
        let api = Arc::new(FakeApi::default());
        api.set_snapshot(snapshot(vec![
            ParkingLot::new("a", "A", Route::Thoothukudi, 50, 100).occupancy(50.0),
            ParkingLot::new("b", "B", Route::Thoothukudi, 90, 100).occupancy(90.0),
        ]));
        let renderer = renderer(api.clone(), Theme::Light);

        renderer.fetch_and_render_data().await.unwrap();

        let view = renderer.view().await.unwrap();
        assert_eq!(view.route(Route::Thoothukudi).count_text, "140 / 200");
        assert!(renderer.refreshed_at().await.is_some());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_stale_view() {
        let api = Arc::new(FakeApi::default());
        api.set_snapshot(snapshot(vec![ParkingLot::new("a", "A", Route::Nagercoil, 5, 10)]));
        let renderer = renderer(api.clone(), Theme::Light);
        renderer.fetch_and_render_data().await.unwrap();

        api.fail_snapshot();
        assert!(renderer.fetch_and_render_data().await.is_err());

        let page = renderer.page_state().await;
        assert_eq!(page.view.unwrap().route(Route::Nagercoil).count_text, "5 / 10");
        assert!(page.status.last_error.is_some());
        assert!(page.status.last_success.is_some());
    }

    #[tokio::test]
    async fn test_overall_chart_uses_theme() {
        let api = Arc::new(FakeApi::default());
        api.set_overall(overall());
        let renderer = renderer(api.clone(), Theme::Dark);

        assert!(!renderer.has_overall_chart().await);
        renderer.fetch_and_render_overall_history().await.unwrap();

        let json = renderer.page_state().await.overall_chart_json.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["datasets"].as_array().unwrap().len(), 3);
        assert_eq!(value["options"]["scales"]["x"]["ticks"]["color"], "#e0e0e0");
    }

    #[tokio::test]
    async fn test_theme_change_rebuilds_chart_without_refetch() {
        let api = Arc::new(FakeApi::default());
        api.set_overall(overall());
        api.set_snapshot(snapshot(vec![ParkingLot::new("a", "A", Route::Nagercoil, 5, 10)]));
        let renderer = renderer(api.clone(), Theme::Light);
        renderer.fetch_and_render_overall_history().await.unwrap();
        renderer.fetch_and_render_data().await.unwrap();

        let applied = renderer.set_theme(Theme::Dark).await;
        assert!(applied.toggle_checked);

        let page = renderer.page_state().await;
        let value: serde_json::Value =
            serde_json::from_str(page.overall_chart_json.as_deref().unwrap()).unwrap();
        assert_eq!(value["options"]["plugins"]["legend"]["labels"]["color"], "#e0e0e0");
        assert_eq!(value["data"]["datasets"].as_array().unwrap().len(), 3);
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 1);

        let view = page.view.unwrap();
        assert_eq!(view.theme, Theme::Dark);
        assert_eq!(view.route(Route::Nagercoil).cards[0].button_class, "btn-outline-light");
    }

    #[tokio::test]
    async fn test_theme_change_without_chart_draws_nothing() {
        let api = Arc::new(FakeApi::default());
        let renderer = renderer(api.clone(), Theme::Light);

        renderer.toggle_theme().await;
        assert_eq!(renderer.theme().await, Theme::Dark);
        assert!(!renderer.has_overall_chart().await);
    }

    #[tokio::test]
    async fn test_lot_history_modal() {
        let api = Arc::new(FakeApi::default());
        api.add_lot(
            "p1",
            LotHistory {
                lot_name: "Beach Road".to_string(),
                datasets: vec![],
            },
        );
        let renderer = renderer(api.clone(), Theme::Light);

        let view = renderer.open_lot_history("p1").await;
        assert_eq!(view.title, "Last 24-Hour History for Beach Road");
        assert!(view.canvas_visible);

        let view = renderer.open_lot_history("rejected").await;
        assert_eq!(view.title, "Error");
        assert_eq!(view.loading_text, "Could not load historical data.");
        assert!(!view.canvas_visible);

        assert!(!renderer.page_state().await.modal.open);
    }

    #[tokio::test]
    async fn test_overlapping_fetches_apply_in_completion_order() {
        let first = snapshot(vec![
            ParkingLot::new("t1", "T1", Route::Thoothukudi, 10, 100),
            ParkingLot::new("n1", "N1", Route::Nagercoil, 20, 100),
            ParkingLot::new("v1", "V1", Route::Tirunelveli, 30, 100),
        ]);
        let second = SnapshotResponse {
            last_updated: "2026-10-16 12:01:00".to_string(),
            data: vec![
                ParkingLot::new("t1", "T1", Route::Thoothukudi, 80, 100),
                ParkingLot::new("n1", "N1", Route::Nagercoil, 70, 100),
                ParkingLot::new("v1", "V1", Route::Tirunelveli, 60, 100),
                ParkingLot::new("v2", "V2", Route::Tirunelveli, 5, 50),
            ],
        };

        let api = Arc::new(FakeApi::default());
        let release_first = api.hold_snapshot(first.clone());
        let release_second = api.hold_snapshot(second.clone());
        let renderer = Arc::new(renderer(api.clone(), Theme::Light));

        let slow = tokio::spawn({
            let renderer = renderer.clone();
            async move { renderer.fetch_and_render_data().await }
        });
        api.wait_for_snapshot_calls(1).await;
        let fast = tokio::spawn({
            let renderer = renderer.clone();
            async move { renderer.fetch_and_render_data().await }
        });
        api.wait_for_snapshot_calls(2).await;

        release_second.send(()).unwrap();
        fast.await.unwrap().unwrap();
        assert_eq!(renderer.view().await.unwrap(), DashboardView::build(&second, Theme::Light));

        release_first.send(()).unwrap();
        slow.await.unwrap().unwrap();

        let view = renderer.view().await.unwrap();
        assert_eq!(view, DashboardView::build(&first, Theme::Light));
        assert_eq!(view.total_vehicles, "60");
        for route in Route::ALL {
            assert_eq!(view.route(route).cards.len(), 1);
        }
        assert_eq!(view.route(Route::Tirunelveli).count_text, "30 / 100");
    }

    #[tokio::test]
    async fn test_theme_change_during_fetch_reaches_view() {
        let api = Arc::new(FakeApi::default());
        let release = api.hold_snapshot(snapshot(vec![ParkingLot::new(
            "a",
            "A",
            Route::Nagercoil,
            5,
            10,
        )]));
        let renderer = Arc::new(renderer(api.clone(), Theme::Light));

        let fetch = tokio::spawn({
            let renderer = renderer.clone();
            async move { renderer.fetch_and_render_data().await }
        });
        api.wait_for_snapshot_calls(1).await;

        renderer.set_theme(Theme::Dark).await;
        release.send(()).unwrap();
        fetch.await.unwrap().unwrap();

        let view = renderer.view().await.unwrap();
        assert_eq!(view.theme, Theme::Dark);
        assert_eq!(view.route(Route::Nagercoil).cards[0].button_class, "btn-outline-light");
    }
}
