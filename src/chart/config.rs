//! Chart Configuration
//!
//! The complete object handed to the chart library: kind, datasets and
//! options.

use serde::Serialize;

use super::options::ChartOptions;
use super::slot::ChartInstance;
use crate::model::ChartSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<ChartSeries>,
}

/// `new Chart(ctx, config)` argument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Multi-series line chart
    pub fn line(datasets: Vec<ChartSeries>, options: ChartOptions) -> Self {
        Self {
            kind: ChartKind::Line,
            data: ChartData { datasets },
            options,
        }
    }

    /// JSON safe to inline in a `<script type="application/json">` block
    pub fn to_embedded_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace("</", "<\\/"))
    }
}

/// A chart bound to a page canvas
#[derive(Debug, Clone)]
pub struct RenderedChart {
    /// Canvas element id
    pub canvas_id: &'static str,
    pub config: ChartConfig,
    /// Embedded JSON of `config`
    pub json: String,
    /// Build counter for this canvas
    pub generation: u64,
}

impl RenderedChart {
    pub fn new(
        canvas_id: &'static str,
        config: ChartConfig,
        generation: u64,
    ) -> Result<Self, serde_json::Error> {
        let json = config.to_embedded_json()?;
        Ok(Self {
            canvas_id,
            config,
            json,
            generation,
        })
    }

    /// Source series, kept so the chart can be rebuilt for a new theme
    pub fn datasets(&self) -> &[ChartSeries] {
        &self.config.data.datasets
    }
}

impl ChartInstance for RenderedChart {
    fn destroy(&mut self) {
        tracing::trace!(
            "Destroying chart on #{} (generation {})",
            self.canvas_id,
            self.generation
        );
        self.config.data.datasets.clear();
        self.json.clear();
    }
}
