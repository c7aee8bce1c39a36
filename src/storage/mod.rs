//! File-backed persistence
//! 
//! Profiles with their session logs, application settings and session
//! export documents. Everything lives under one data directory.

pub mod error;
pub mod export;
pub mod profiles;
pub mod sessions;
pub mod settings;

use std::path::PathBuf;

// Re-export main types
pub use error::StorageError;
pub use export::{export_file_name, sessions_to_csv, sessions_to_json, ExportFormat};
pub use profiles::{is_valid_profile_name, ProfileData, ProfileManager, DEFAULT_PROFILE};
pub use sessions::Session;
pub use settings::{Settings, SettingsStore};

/// Default data directory (`<config dir>/tidskollen`)
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    dirs::config_dir()
        .map(|dir| dir.join("tidskollen"))
        .ok_or(StorageError::NoDataDir)
}
