//! State management module
//!
//! The sleep timer core (presets, selector, countdown) as pure transitions,
//! plus the shared application state used to reach it.

pub mod app_state;
pub mod countdown;
pub mod key_event;
pub mod presets;
pub mod selector;
pub mod signals;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerCommand};
pub use countdown::{Countdown, Phase, NOTIFY_THRESHOLDS};
pub use key_event::{KeyAction, KeyEvent, DEFAULT_CYCLE_KEY};
pub use presets::{standard_presets, Preset, PresetList};
pub use selector::{PressKind, Selector, TimerPolicy, DEFAULT_DEBOUNCE_WINDOW};
pub use signals::{Notification, Signal, Transition};
pub use timer_state::{TimerSnapshot, TimerState};
