//! Application settings

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::StorageError;

/// Persisted application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Set once the first-run welcome has been shown
    pub welcome_shown: bool,
    /// Default frame size for rendering the progress ring
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            welcome_shown: false,
            window_width: 450,
            window_height: 600,
        }
    }
}

/// Reads and writes `settings.json`
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("settings.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults for a missing or corrupt file
    pub fn load(&self) -> Settings {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!("Failed to read {}: {}", self.path.display(), e);
                }
                return Settings::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring corrupt settings in {}: {}", self.path.display(), e);
            Settings::default()
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| StorageError::json(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| StorageError::io(&self.path, e))?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
