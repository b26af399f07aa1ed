//! Theme Controller
//!
//! Resolves the startup theme and applies explicit changes.

use super::{SystemPreference, Theme, ThemeStore};

/// Root element attribute carrying the theme
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Result of applying a theme: what the page must reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTheme {
    pub theme: Theme,
    /// Checked state of the toggle switch
    pub toggle_checked: bool,
    /// Whether the value reached the store
    pub persisted: bool,
}

/// Owns the current theme and its persistence
pub struct ThemeController {
    store: Box<dyn ThemeStore>,
    system: SystemPreference,
    current: Theme,
}

impl ThemeController {
    /// Create a controller and apply the preferred theme, writing it back
    pub fn new(store: Box<dyn ThemeStore>, system: SystemPreference) -> Self {
        let mut controller = Self::load(store, system);
        controller.set_theme(controller.current);
        controller
    }

    /// Create a controller with the preferred theme without touching the store
    pub fn load(store: Box<dyn ThemeStore>, system: SystemPreference) -> Self {
        let mut controller = Self {
            store,
            system,
            current: system.theme(),
        };
        controller.current = controller.preferred_theme();
        controller
    }

    /// Stored preference, else the system signal
    pub fn preferred_theme(&self) -> Theme {
        match self.store.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => self.system.theme(),
            Err(e) => {
                tracing::warn!("Ignoring stored theme: {}", e);
                self.system.theme()
            }
        }
    }

    /// Theme currently applied
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Apply and persist a theme.
    ///
    /// A failed write is logged; the theme still applies for this process.
    pub fn set_theme(&mut self, theme: Theme) -> AppliedTheme {
        self.current = theme;

        let persisted = match self.store.save(theme) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist theme {}: {}", theme, e);
                false
            }
        };

        tracing::debug!("Applied {}={}", THEME_ATTRIBUTE, theme);

        AppliedTheme {
            theme,
            toggle_checked: theme.is_dark(),
            persisted,
        }
    }

    /// Flip between light and dark
    pub fn toggle(&mut self) -> AppliedTheme {
        self.set_theme(self.current.toggled())
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("system", &self.system)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
