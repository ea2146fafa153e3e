//! Utility functions module
//!
//! Formatting helpers and OS signal handling shared by the rest of the crate.

pub mod format;
pub mod signals;

pub use format::{format_remaining, format_threshold, format_uptime};
pub use signals::{shutdown_signal, HostEvent, HostSignals};
