//! Sleep Remote - a remote-driven sleep timer
//!
//! Repeated presses of one remote button cycle through fixed timer presets.
//! When the countdown runs out the screen timeout is lowered so the display
//! goes to sleep, and the normal timeout comes back as soon as it wakes up.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{ActionError, PresetError, StateError};
pub use state::{AppState, TimerPolicy, TimerState};
pub use utils::signals::shutdown_signal;
