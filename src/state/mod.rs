//! State management module
//! 
//! This module wires the countdown to the rest of the application: change
//! notifications, the session log and the active profile.

pub mod app_state;
pub mod events;

// Re-export main types
pub use app_state::{AppState, StateConfig};
pub use events::{ChannelObserver, TimerEvent};
