//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod host_signals;
pub mod sleep_timer;

// Re-export main functions
pub use host_signals::host_signal_task;
pub use sleep_timer::sleep_timer_task;
