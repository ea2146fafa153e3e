//! Raw remote-control key events

use serde::{Deserialize, Serialize};

/// Red programmable key on most TV remotes
pub const DEFAULT_CYCLE_KEY: u32 = 183;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    Down,
    Up,
}

/// Key event as delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key_code: u32,
    pub action: KeyAction,
    /// Auto-repeat counter, 0 for the initial press
    #[serde(default)]
    pub repeat_count: u32,
}

impl KeyEvent {
    /// Only the initial press-down of the cycle key counts; releases and
    /// auto-repeats are dropped here so the timer never sees them.
    pub fn is_cycle_press(&self, cycle_key: u32) -> bool {
        self.key_code == cycle_key && self.action == KeyAction::Down && self.repeat_count == 0
    }
}
