//! Parkwatch CLI
//!
//! Command-line access to the same data and settings the dashboard uses:
//! - Print the current snapshot
//! - Print history chart configs
//! - Read or change the persisted theme
//! - Generate a default config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use parkwatch::chart::{chart_options, single_lot_chart_options, ChartConfig};
use parkwatch::client::{HttpParkingApi, ParkingApi};
use parkwatch::config::{generate_default_config, Config};
use parkwatch::dashboard::DashboardView;
use parkwatch::telemetry::init_logging;
use parkwatch::theme::{FileThemeStore, Theme, ThemeController};

#[derive(Parser)]
#[command(name = "parkwatch-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query the parking occupancy API and manage dashboard settings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Occupancy API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json); snapshot defaults to table, history to json
    #[arg(short, long, global = true)]
    pub format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print the current snapshot
    Snapshot,

    /// Print a history chart config (aggregate, or one lot with --lot)
    History {
        /// Parking lot id
        #[arg(short, long)]
        lot: Option<String>,
    },

    /// Show or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Get,
    /// Set the theme (light or dark)
    Set { theme: Theme },
    /// Switch between light and dark
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Snapshot => {
            let (config, theme) = setup(&cli.config, &cli.api_url)?;
            let api = HttpParkingApi::new(config.upstream.client_config())?;
            let snapshot = match api.fetch_snapshot().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    eprintln!("Cannot fetch snapshot from {}", api.base_url());
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            if cli.format.as_deref() == Some("json") {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_snapshot(&DashboardView::build(&snapshot, theme.current()));
            }
        }

        Commands::History { lot } => {
            let (config, theme) = setup(&cli.config, &cli.api_url)?;
            let api = HttpParkingApi::new(config.upstream.client_config())?;
            let current = theme.current();

            let chart = match lot {
                Some(lot_id) => {
                    let history = api.fetch_lot_history(&lot_id).await?;
                    eprintln!("Last 24-Hour History for {}", history.lot_name);
                    ChartConfig::line(history.datasets, single_lot_chart_options(current))
                }
                None => {
                    let history = api.fetch_overall_history().await?;
                    ChartConfig::line(history.datasets, chart_options(current))
                }
            };

            if cli.format.as_deref() == Some("table") {
                print_series(&chart);
            } else {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            }
        }

        Commands::Theme { action } => {
            let (config, mut theme) = setup(&cli.config, &cli.api_url)?;
            let applied = match action {
                None | Some(ThemeAction::Get) => {
                    println!("{}", theme.current());
                    return Ok(());
                }
                Some(ThemeAction::Set { theme: next }) => theme.set_theme(next),
                Some(ThemeAction::Toggle) => theme.toggle(),
            };

            if applied.persisted {
                println!("Theme set to {}", applied.theme);
            } else {
                eprintln!(
                    "Theme {} could not be saved to {:?}",
                    applied.theme, config.theme.state_file
                );
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Load config, start logging and read the theme.
///
/// The theme file is only written by `theme set` and `theme toggle`.
fn setup(
    config_path: &Option<PathBuf>,
    api_url: &Option<String>,
) -> anyhow::Result<(Config, ThemeController)> {
    let mut config = Config::resolve(config_path.as_deref())?;
    if let Some(url) = api_url {
        config.upstream.base_url = url.clone();
    }
    init_logging(&config.logging);

    let theme = ThemeController::load(
        Box::new(FileThemeStore::new(&config.theme.state_file)),
        config.theme.system_preference(),
    );

    Ok((config, theme))
}

fn print_snapshot(view: &DashboardView) {
    println!("Last updated: {}", view.last_updated);
    println!(
        "Overall: {} / {} vehicles ({})",
        view.total_vehicles, view.total_capacity, view.overall.label
    );

    for route in &view.routes {
        println!();
        println!(
            "{} Route  {}  ({})",
            route.name, route.count_text, route.progress.label
        );
        println!("{}", "-".repeat(64));

        if route.cards.is_empty() {
            println!("  No lots");
            continue;
        }

        for card in &route.cards {
            println!(
                "  {:<30} {:>16} {:>5}  {}",
                truncate(&card.name, 30),
                card.occupancy_text.trim_start_matches("Occupancy: "),
                card.progress.label,
                card.status_text
            );
        }
    }

    if !view.unrouted.is_empty() {
        println!();
        println!("Lots on unknown routes: {}", view.unrouted.join(", "));
    }
}

fn print_series(chart: &ChartConfig) {
    if chart.data.datasets.is_empty() {
        println!("No history");
        return;
    }

    println!("{:<36} {:>8} {:>22}", "Series", "Points", "Latest");
    println!("{}", "-".repeat(68));
    for series in &chart.data.datasets {
        let latest = series
            .last()
            .map(|p| format!("{} @ {}", p.y, p.x))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<36} {:>8} {:>22}",
            truncate(&series.label, 36),
            series.data.len(),
            latest
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
