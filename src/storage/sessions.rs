//! Timer session records

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One finished or abandoned countdown run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Local time the run ended, `YYYY-MM-DD HH:MM`
    #[serde(default)]
    pub date: String,
    /// Length of the run in whole minutes
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub completed: bool,
}

impl Session {
    pub fn new(ended_at: DateTime<Local>, total_seconds: u64, completed: bool) -> Self {
        Self {
            date: ended_at.format("%Y-%m-%d %H:%M").to_string(),
            duration: total_seconds / 60,
            completed,
        }
    }

    /// Session ending now
    pub fn now(total_seconds: u64, completed: bool) -> Self {
        Self::new(Local::now(), total_seconds, completed)
    }
}
