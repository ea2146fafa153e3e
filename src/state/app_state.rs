//! Shared application state
//!
//! The timer state itself lives inside the sleep timer task. Everything else
//! talks to it through [`TimerCommand`]s and reads the published
//! [`TimerSnapshot`].

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::{selector::TimerPolicy, timer_state::TimerSnapshot};
use crate::{error::StateError, utils::format_uptime};

/// Requests serialized onto the sleep timer task
#[derive(Debug)]
pub enum TimerCommand {
    /// Cycle-button press
    Press { reply: Option<oneshot::Sender<TimerSnapshot>> },
    /// Display turned on
    Wake { reply: Option<oneshot::Sender<TimerSnapshot>> },
    /// Cancel any countdown and end the task
    Stop,
}

/// Capacity of the command queue
const COMMAND_BUFFER: usize = 32;

/// Main application state shared by the HTTP layer and background tasks
#[derive(Debug)]
pub struct AppState {
    /// Preset list and debounce window
    pub policy: TimerPolicy,
    /// Inbound events for the sleep timer task
    pub command_tx: mpsc::Sender<TimerCommand>,
    /// Latest timer snapshot, published by the sleep timer task
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create the state together with the receiving end of the command queue
    pub fn new(
        port: u16,
        host: String,
        policy: TimerPolicy,
    ) -> (Self, mpsc::Receiver<TimerCommand>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerSnapshot::initial(&policy));

        let state = Self {
            policy,
            command_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        };

        (state, command_rx)
    }

    /// Deliver a cycle-button press and wait for the resulting snapshot
    pub async fn press(&self, source: &str) -> Result<TimerSnapshot, StateError> {
        self.record_action(&format!("press ({})", source));
        self.request(|reply| TimerCommand::Press { reply: Some(reply) }).await
    }

    /// Deliver a display wake-up and wait for the resulting snapshot
    pub async fn wake(&self, source: &str) -> Result<TimerSnapshot, StateError> {
        self.record_action(&format!("wake ({})", source));
        self.request(|reply| TimerCommand::Wake { reply: Some(reply) }).await
    }

    /// Ask the sleep timer task to cancel its countdown and exit
    pub async fn stop(&self) -> Result<(), StateError> {
        self.command_tx
            .send(TimerCommand::Stop)
            .await
            .map_err(|_| StateError::TimerUnavailable)
    }

    async fn request<F>(&self, command: F) -> Result<TimerSnapshot, StateError>
    where
        F: FnOnce(oneshot::Sender<TimerSnapshot>) -> TimerCommand,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| StateError::TimerUnavailable)?;

        reply_rx.await.map_err(|_| StateError::NoReply)
    }

    /// Publish a new timer snapshot to watchers
    pub fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Get the latest published timer snapshot
    pub fn get_timer_snapshot(&self) -> TimerSnapshot {
        self.timer_update_tx.borrow().clone()
    }

    fn record_action(&self, action: &str) {
        info!("Timer action: {}", action);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn press_without_timer_task_fails() {
        let (state, command_rx) = AppState::new(0, "127.0.0.1".into(), TimerPolicy::default());
        drop(command_rx);

        assert_eq!(state.press("test").await, Err(StateError::TimerUnavailable));
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("press (test)"));
        assert!(time.is_some());
    }

    #[tokio::test]
    async fn publish_updates_snapshot() {
        let (state, _command_rx) = AppState::new(0, "127.0.0.1".into(), TimerPolicy::default());
        assert_eq!(state.get_timer_snapshot().preset_label, "OFF");

        let mut snapshot = state.get_timer_snapshot();
        snapshot.preset_label = "60 min".into();
        state.publish(snapshot.clone());
        assert_eq!(state.get_timer_snapshot(), snapshot);
    }
}
