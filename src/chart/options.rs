//! Chart Option Builder
//!
//! Theme-aware Chart.js options. Built fresh on every render so a theme
//! change takes effect on the next rebuild.

use serde::Serialize;

use crate::theme::Theme;

/// Y-axis title of the aggregate chart
pub const VEHICLE_COUNT_TITLE: &str = "Total Vehicle Count";

/// Y-axis title of the single-lot chart
pub const OCCUPANCY_TITLE: &str = "Occupancy (%)";

/// Text and grid colors for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub text: &'static str,
    pub grid: &'static str,
}

impl ChartPalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: "#e0e0e0",
                grid: "rgba(255, 255, 255, 0.15)",
            },
            Theme::Light => Self {
                text: "#333",
                grid: "rgba(0, 0, 0, 0.1)",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: Interaction,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: &'static str,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub tooltip: Tooltip,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub position: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabels {
    pub color: &'static str,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub weight: &'static str,
}

impl Font {
    fn bold() -> Self {
        Self { weight: "bold" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: LinearAxis,
    pub x: TimeAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
    pub color: &'static str,
    pub font: Font,
}

impl AxisTitle {
    fn new(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            display: true,
            text: text.into(),
            color,
            font: Font::bold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearAxis {
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub title: AxisTitle,
    pub ticks: Ticks,
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub time: TimeUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    pub ticks: Ticks,
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeUnit {
    pub unit: &'static str,
    pub tooltip_format: &'static str,
    pub display_formats: DisplayFormats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFormats {
    pub hour: &'static str,
}

/// Options for the aggregate vehicle-count chart
pub fn chart_options(theme: Theme) -> ChartOptions {
    let palette = ChartPalette::for_theme(theme);

    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: false,
        interaction: Interaction {
            mode: "index",
            intersect: false,
        },
        plugins: Plugins {
            tooltip: Tooltip { position: "nearest" },
            legend: Legend {
                labels: LegendLabels {
                    color: palette.text,
                    font: Font::bold(),
                },
            },
        },
        scales: Scales {
            y: LinearAxis {
                begin_at_zero: true,
                max: None,
                title: AxisTitle::new(VEHICLE_COUNT_TITLE, palette.text),
                ticks: Ticks { color: palette.text },
                grid: Grid { color: palette.grid },
            },
            x: TimeAxis {
                kind: "time",
                time: TimeUnit {
                    unit: "hour",
                    tooltip_format: "MMM d, h:mm a",
                    display_formats: DisplayFormats { hour: "h a" },
                },
                title: None,
                ticks: Ticks { color: palette.text },
                grid: Grid { color: palette.grid },
            },
        },
    }
}

/// Options for one lot's occupancy chart: percentage scale capped at 100
pub fn single_lot_chart_options(theme: Theme) -> ChartOptions {
    let mut options = chart_options(theme);

    options.scales.y.title.text = OCCUPANCY_TITLE.to_string();
    options.scales.y.max = Some(100.0);
    options.scales.x.title = Some(AxisTitle::new("Time", options.scales.x.ticks.color));

    options
}
