//! Theme Handling
//!
//! Light/dark preference, its persistence, and the controller that applies it.
//!
//! The theme is read once at startup (stored value, else the system
//! preference), changed only by an explicit toggle, and never deleted.

mod controller;
mod store;

pub use controller::{AppliedTheme, ThemeController};
pub use store::{FileThemeStore, MemoryThemeStore, ThemeStore, ThemeStoreError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value of the `data-bs-theme` root attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Theme selected by the toggle switch
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown theme name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme {0:?} (expected \"light\" or \"dark\")")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Operating-system level dark-mode signal, used when nothing is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemPreference {
    pub prefers_dark: bool,
}

impl SystemPreference {
    pub fn new(prefers_dark: bool) -> Self {
        Self { prefers_dark }
    }

    pub fn theme(&self) -> Theme {
        Theme::from_checked(self.prefers_dark)
    }
}
