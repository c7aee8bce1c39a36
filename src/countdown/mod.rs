//! Countdown module
//! 
//! This module contains the countdown state machine, the tick scheduler
//! contract and the preset list.

pub mod controller;
pub mod presets;
pub mod scheduler;

// Re-export main types
pub use controller::{Countdown, CountdownObserver, TickOutcome, TimerState, DEFAULT_TOTAL_SECONDS};
pub use presets::{Presets, DEFAULT_PRESETS};
pub use scheduler::{ManualScheduler, Scheduler, TickHandle, TokioScheduler, TICK_PERIOD};
