//! Tidskollen - A visual countdown timer for children
//! 
//! This library provides the countdown state machine, the progress ring
//! renderer, profile and session storage, and the HTTP API that drives them.

pub mod api;
pub mod config;
pub mod countdown;
pub mod extensions;
pub mod render;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use countdown::{Countdown, TimerState};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
