//! Lot History Modal
//!
//! ```text
//! closed --open--> loading --ok--> rendered
//!                     |
//!                     +--err--> failed
//! ```
//!
//! Every open destroys the previous chart. There is no retry: reopening the
//! modal issues a fresh request.

use serde::Serialize;

use crate::chart::{single_lot_chart_options, ChartConfig, ChartSlot, RenderedChart, SINGLE_LOT_CANVAS_ID};
use crate::client::ClientResult;
use crate::model::LotHistory;
use crate::theme::Theme;

/// Title shown when the history request fails
pub const ERROR_TITLE: &str = "Error";

/// Loading text replacement on failure
pub const ERROR_MESSAGE: &str = "Could not load historical data.";

/// Loading indicator text
pub const LOADING_TEXT: &str = "Loading history...";

const DEFAULT_TITLE: &str = "Lot History";

/// Where the modal is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ModalState {
    #[default]
    Closed,
    Loading { lot_id: String },
    Rendered { lot_id: String, title: String },
    Failed { lot_id: String },
}

/// What the modal elements should show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub open: bool,
    pub lot_id: Option<String>,
    pub title: String,
    pub loading_visible: bool,
    pub loading_text: &'static str,
    pub canvas_visible: bool,
    /// Chart config to draw on the canvas
    pub chart_json: Option<String>,
}

/// Single-lot history modal and the chart it owns
#[derive(Debug, Default)]
pub struct HistoryModal {
    state: ModalState,
    chart: ChartSlot<RenderedChart>,
    generation: u64,
}

impl HistoryModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Show the loading indicator for a lot, hiding and destroying any chart
    pub fn open(&mut self, lot_id: impl Into<String>) {
        self.chart.dispose();
        let lot_id = lot_id.into();
        tracing::debug!("Opening history modal for lot {}", lot_id);
        self.state = ModalState::Loading { lot_id };
    }

    /// Apply a finished history request.
    ///
    /// Completions apply in arrival order, so when a lot is reopened quickly
    /// the last response to arrive wins. Returns `false` if the modal was
    /// closed meanwhile and the result was dropped.
    pub fn complete(&mut self, lot_id: &str, result: ClientResult<LotHistory>, theme: Theme) -> bool {
        if self.state == ModalState::Closed {
            tracing::debug!("Dropping history for lot {}: modal closed", lot_id);
            return false;
        }

        let lot_id = lot_id.to_string();

        match result {
            Ok(history) => {
                self.generation += 1;
                let generation = self.generation;
                let config = ChartConfig::line(history.datasets, single_lot_chart_options(theme));

                match self
                    .chart
                    .try_replace_with(|| RenderedChart::new(SINGLE_LOT_CANVAS_ID, config, generation))
                {
                    Ok(_) => {
                        self.state = ModalState::Rendered {
                            lot_id,
                            title: format!("Last 24-Hour History for {}", history.lot_name),
                        };
                    }
                    Err(e) => {
                        tracing::warn!("Could not build history chart for lot {}: {}", lot_id, e);
                        self.state = ModalState::Failed { lot_id };
                    }
                }
            }
            Err(e) => {
                tracing::warn!("History request for lot {} failed: {}", lot_id, e);
                self.chart.dispose();
                self.state = ModalState::Failed { lot_id };
            }
        }

        true
    }

    /// Hide the modal and release its chart
    pub fn close(&mut self) {
        self.chart.dispose();
        self.state = ModalState::Closed;
    }

    /// Element states for the page
    pub fn view(&self) -> ModalView {
        match &self.state {
            ModalState::Closed => ModalView {
                open: false,
                lot_id: None,
                title: DEFAULT_TITLE.to_string(),
                loading_visible: false,
                loading_text: LOADING_TEXT,
                canvas_visible: false,
                chart_json: None,
            },
            ModalState::Loading { lot_id } => ModalView {
                open: true,
                lot_id: Some(lot_id.clone()),
                title: DEFAULT_TITLE.to_string(),
                loading_visible: true,
                loading_text: LOADING_TEXT,
                canvas_visible: false,
                chart_json: None,
            },
            ModalState::Rendered { lot_id, title } => ModalView {
                open: true,
                lot_id: Some(lot_id.clone()),
                title: title.clone(),
                loading_visible: false,
                loading_text: LOADING_TEXT,
                canvas_visible: true,
                chart_json: self.chart.get().map(|chart| chart.json.clone()),
            },
            ModalState::Failed { lot_id } => ModalView {
                open: true,
                lot_id: Some(lot_id.clone()),
                title: ERROR_TITLE.to_string(),
                loading_visible: true,
                loading_text: ERROR_MESSAGE,
                canvas_visible: false,
                chart_json: None,
            },
        }
    }

    /// Whether a chart is currently drawn in the modal
    pub fn has_chart(&self) -> bool {
        self.chart.is_rendered()
    }
}
