//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::TimerState;

/// Timer state as reported to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
    /// Portion of the countdown left, drives the wedge
    pub fraction: f64,
    /// Remaining time as `M:SS`
    pub label: String,
}

impl From<TimerState> for TimerSnapshot {
    fn from(state: TimerState) -> Self {
        Self {
            total_seconds: state.total_seconds,
            remaining_seconds: state.remaining_seconds,
            running: state.running,
            fraction: state.fraction(),
            label: state.label(),
        }
    }
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer: timer.into(),
        }
    }

    /// Response for a command that changed the timer
    pub fn applied(message: String, timer: TimerState) -> Self {
        Self::new("applied".to_string(), message, timer)
    }

    /// Response for a command that was not valid in the current state
    pub fn ignored(message: String, timer: TimerState) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }
}

/// Status response with timer, clock and profile information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    /// Local wall clock, `%Y-%m-%d %H:%M:%S`
    pub clock: String,
    pub profile: String,
    pub presets: Vec<u32>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub current: String,
    pub profiles: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
