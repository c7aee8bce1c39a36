//! Completion alert extensions
//!
//! The set of alerts is fixed at build time. Which ones run is chosen on
//! the command line.

pub mod alerts;

// Re-export main types
pub use alerts::{Alert, AlertKind};
