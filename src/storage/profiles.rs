//! User profiles

use std::{
    collections::BTreeSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{error::StorageError, sessions::Session};

pub const DEFAULT_PROFILE: &str = "default";

/// File holding the name of the active profile
const CURRENT_FILE: &str = ".current";

/// Data stored per profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// Manages the profile directory and the active profile
#[derive(Debug)]
pub struct ProfileManager {
    dir: PathBuf,
    current: String,
}

impl ProfileManager {
    /// Open (creating if needed) the profile directory under `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        let dir = data_dir.join("profiles");
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;

        let current = load_current(&dir);
        debug!("Profiles in {}, current={}", dir.display(), current);
        Ok(Self { dir, current })
    }

    /// Name of the active profile
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Make `name` the active profile and remember it
    pub fn switch(&mut self, name: &str) -> Result<(), StorageError> {
        validate_name(name)?;
        let path = self.dir.join(CURRENT_FILE);
        fs::write(&path, name).map_err(|e| StorageError::io(&path, e))?;
        self.current = name.to_string();
        info!("Switched to profile {}", name);
        Ok(())
    }

    /// All known profiles, sorted. Always includes the default profile.
    pub fn list_profiles(&self) -> Result<Vec<String>, StorageError> {
        let mut names = BTreeSet::new();
        names.insert(DEFAULT_PROFILE.to_string());

        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_name(stem).is_ok() {
                    names.insert(stem.to_string());
                }
            }
        }

        Ok(names.into_iter().collect())
    }

    /// Save data for the active profile
    pub fn save_data(&self, data: &ProfileData) -> Result<(), StorageError> {
        let path = self.data_path();
        let json = serde_json::to_string_pretty(data).map_err(|e| StorageError::json(&path, e))?;
        fs::write(&path, json).map_err(|e| StorageError::io(&path, e))?;
        debug!("Saved {} sessions to {}", data.sessions.len(), path.display());
        Ok(())
    }

    /// Load data for the active profile.
    ///
    /// A missing or unreadable JSON file yields empty data.
    pub fn load_data(&self) -> Result<ProfileData, StorageError> {
        let path = self.data_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProfileData::default()),
            Err(e) => return Err(StorageError::io(&path, e)),
        };

        match serde_json::from_str(&raw) {
            Ok(data) => Ok(data),
            Err(e) => {
                warn!("Ignoring corrupt profile data in {}: {}", path.display(), e);
                Ok(ProfileData::default())
            }
        }
    }

    fn data_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.current))
    }
}

fn load_current(dir: &Path) -> String {
    fs::read_to_string(dir.join(CURRENT_FILE))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|name| validate_name(name).is_ok())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// Check whether `name` can be used as a profile name
pub fn is_valid_profile_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

/// Profile names become file names: keep them to a safe character set
fn validate_name(name: &str) -> Result<(), StorageError> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidProfileName(name.to_string()))
    }
}
