//! Theme Persistence
//!
//! A single key holding `"light"` or `"dark"`. The file store is the
//! service's equivalent of browser local storage: it survives restarts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use super::Theme;

/// Errors from reading or writing the stored theme
#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("Theme state I/O error at {path:?}: {error}")]
    Io { path: PathBuf, error: std::io::Error },

    #[error("Theme state at {path:?} is corrupt: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Where the theme preference lives
pub trait ThemeStore: Send + Sync {
    /// Stored theme, or `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError>;

    /// Persist the theme, replacing any previous value
    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTheme {
    theme: Theme,
}

/// JSON file holding `{"theme": "dark"}`
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(ThemeStoreError::Io {
                    path: self.path.clone(),
                    error,
                })
            }
        };

        let stored: StoredTheme =
            serde_json::from_str(&content).map_err(|e| ThemeStoreError::Parse {
                path: self.path.clone(),
                error: e.to_string(),
            })?;

        Ok(Some(stored.theme))
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|error| ThemeStoreError::Io {
                    path: parent.to_path_buf(),
                    error,
                })?;
            }
        }

        let body = serde_json::to_string(&StoredTheme { theme }).map_err(|e| {
            ThemeStoreError::Parse {
                path: self.path.clone(),
                error: e.to_string(),
            }
        })?;

        std::fs::write(&self.path, body).map_err(|error| ThemeStoreError::Io {
            path: self.path.clone(),
            error,
        })
    }
}

/// Process-local store, forgotten on exit
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a value
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
        Ok(*self.theme.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        *self.theme.lock().unwrap_or_else(|e| e.into_inner()) = Some(theme);
        Ok(())
    }
}
