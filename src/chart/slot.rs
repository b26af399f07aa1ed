//! Chart Ownership
//!
//! Chart instances cannot be recolored or refilled in place. Each refresh
//! destroys the old instance before the new one is built, and an owned
//! instance is destroyed when its slot goes away.

/// A drawn chart holding drawing-surface resources
pub trait ChartInstance {
    /// Release the drawing surface
    fn destroy(&mut self);
}

/// Optional, exclusively owned chart
#[derive(Debug)]
pub struct ChartSlot<C: ChartInstance> {
    current: Option<C>,
}

impl<C: ChartInstance> ChartSlot<C> {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn is_rendered(&self) -> bool {
        self.current.is_some()
    }

    pub fn get(&self) -> Option<&C> {
        self.current.as_ref()
    }

    /// Destroy the current chart, if any. Returns whether one existed.
    pub fn dispose(&mut self) -> bool {
        match self.current.take() {
            Some(mut chart) => {
                chart.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy the current chart, then build and own its replacement
    pub fn replace_with<F>(&mut self, build: F) -> &C
    where
        F: FnOnce() -> C,
    {
        self.dispose();
        self.current.insert(build())
    }

    /// Like [`replace_with`](Self::replace_with) for a fallible build.
    /// The old chart is gone either way; on error the slot stays empty.
    pub fn try_replace_with<F, E>(&mut self, build: F) -> Result<&C, E>
    where
        F: FnOnce() -> Result<C, E>,
    {
        self.dispose();
        let chart = build()?;
        Ok(self.current.insert(chart))
    }
}

impl<C: ChartInstance> Default for ChartSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ChartInstance> Drop for ChartSlot<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct LoggedChart {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl ChartInstance for LoggedChart {
        fn destroy(&mut self) {
            self.log.lock().unwrap().push(format!("destroy {}", self.name));
        }
    }

    fn logged_chart(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> LoggedChart {
        log.lock().unwrap().push(format!("build {}", name));
        LoggedChart {
            name,
            log: Arc::clone(log),
        }
    }

    #[test]
    fn test_destroys_before_building_replacement() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut slot = ChartSlot::new();

        slot.replace_with(|| logged_chart("first", &log));
        slot.replace_with(|| logged_chart("second", &log));

        assert_eq!(
            *log.lock().unwrap(),
            vec!["build first", "destroy first", "build second"]
        );
        assert_eq!(slot.get().map(|p| p.name), Some("second"));
    }

    #[test]
    fn test_drop_destroys_owned_chart() {
        let log = Arc::new(Mutex::new(Vec::new()));
        {
            let mut slot = ChartSlot::new();
            slot.replace_with(|| logged_chart("only", &log));
        }
        assert_eq!(log.lock().unwrap().last().unwrap(), "destroy only");
    }

    #[test]
    fn test_failed_build_leaves_slot_empty() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut slot = ChartSlot::new();
        slot.replace_with(|| logged_chart("old", &log));

        let result: Result<&LoggedChart, &str> = slot.try_replace_with(|| Err("no canvas"));
        assert!(result.is_err());
        assert!(!slot.is_rendered());
        assert_eq!(log.lock().unwrap().last().unwrap(), "destroy old");
    }

    #[test]
    fn test_dispose_empty_slot() {
        let mut slot: ChartSlot<LoggedChart> = ChartSlot::default();
        assert!(!slot.dispose());
        assert!(!slot.is_rendered());
    }
}
