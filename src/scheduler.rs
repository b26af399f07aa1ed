//! Refresh Scheduler
//!
//! Drives the two polling cycles: the snapshot (default every 60 seconds)
//! and the aggregate history (default every 300 seconds). Both fire once
//! immediately on start.
//!
//! Each tick spawns its fetch without waiting for the previous one, so a slow
//! upstream can leave requests overlapping; whichever completes last is what
//! the dashboard shows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::renderer::DashboardRenderer;

/// Polling periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshIntervals {
    pub snapshot: Duration,
    pub history: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            snapshot: Duration::from_secs(60),
            history: Duration::from_secs(300),
        }
    }
}

/// Periodic refresh of the dashboard
pub struct RefreshScheduler {
    renderer: Arc<DashboardRenderer>,
    intervals: RefreshIntervals,
    running: Arc<AtomicBool>,
}

impl RefreshScheduler {
    pub fn new(renderer: Arc<DashboardRenderer>, intervals: RefreshIntervals) -> Self {
        Self {
            renderer,
            intervals,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn intervals(&self) -> RefreshIntervals {
        self.intervals
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start both polling loops in the background.
    ///
    /// The scheduler counts as running as soon as this returns, so a `stop`
    /// issued before the task is first polled still ends the loop.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);
        let scheduler = self.clone();

        tokio::spawn(async move {
            tracing::info!(
                "Refreshing snapshot every {:?}, history every {:?}",
                scheduler.intervals.snapshot,
                scheduler.intervals.history
            );

            let mut snapshot_tick = tokio::time::interval(scheduler.intervals.snapshot);
            let mut history_tick = tokio::time::interval(scheduler.intervals.history);

            loop {
                tokio::select! {
                    _ = snapshot_tick.tick() => {
                        if !scheduler.is_running() {
                            break;
                        }
                        let renderer = scheduler.renderer.clone();
                        tokio::spawn(async move {
                            // Failures are logged and recorded by the renderer
                            let _ = renderer.fetch_and_render_data().await;
                        });
                    }
                    _ = history_tick.tick() => {
                        if !scheduler.is_running() {
                            break;
                        }
                        let renderer = scheduler.renderer.clone();
                        tokio::spawn(async move {
                            let _ = renderer.fetch_and_render_overall_history().await;
                        });
                    }
                }
            }

            tracing::info!("Refresh scheduler stopped");
        })
    }

    /// Stop the scheduler after its next tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
