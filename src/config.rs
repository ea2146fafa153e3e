//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{
    error::PresetError,
    services::TimeoutSettings,
    state::{standard_presets, PresetList, TimerPolicy, DEFAULT_CYCLE_KEY},
};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "sleep-remote")]
#[command(
    about = "A remote-driven sleep timer that lowers the screen timeout when a countdown expires"
)]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Presses closer than this (ms) always change the preset
    #[arg(long, default_value = "3000")]
    pub debounce_ms: u64,

    /// Screen timeout (ms) applied when the countdown expires
    #[arg(long, default_value = "5000")]
    pub short_timeout_ms: u64,

    /// Screen timeout (ms) restored when the display wakes up
    #[arg(long, default_value = "600000")]
    pub normal_timeout_ms: u64,

    /// Command that writes the screen timeout; {ms} and {secs} are substituted
    #[arg(long, default_value = "xset s {secs}")]
    pub timeout_command: String,

    /// Command that shows a notification; {message} is substituted.
    /// Notifications are only logged when unset.
    #[arg(long)]
    pub notify_command: Option<String>,

    /// Key code of the cycle button accepted by POST /key
    #[arg(long, default_value_t = DEFAULT_CYCLE_KEY)]
    pub cycle_key: u32,

    /// Skip writing the normal timeout at start-up
    #[arg(long)]
    pub no_restore_on_start: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Selection rules for the sleep timer
    /// Validated preset list plus the configured debounce window
    pub fn timer_policy(&self) -> Result<TimerPolicy, PresetError> {
        let presets = PresetList::new(standard_presets())?;
        Ok(TimerPolicy::new(presets, Duration::from_millis(self.debounce_ms)))
    }

    pub fn timeout_settings(&self) -> TimeoutSettings {
        TimeoutSettings {
            short_timeout_ms: self.short_timeout_ms,
            normal_timeout_ms: self.normal_timeout_ms,
        }
    }

    pub fn restore_on_start(&self) -> bool {
        !self.no_restore_on_start
    }
}
