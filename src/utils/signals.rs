//! POSIX signal handling: graceful shutdown and host events

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR1, SIGUSR2};
use signal_hook_tokio::{Handle, Signals};
use tracing::info;

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }

    handle.close();
    Ok(())
}

/// Timer events a host can raise with a plain `kill`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// SIGUSR1: the display turned on
    Wake,
    /// SIGUSR2: the cycle button was pressed
    Press,
}

impl HostEvent {
    pub fn from_signal(signal: i32) -> Option<Self> {
        match signal {
            SIGUSR1 => Some(HostEvent::Wake),
            SIGUSR2 => Some(HostEvent::Press),
            _ => None,
        }
    }
}

/// Subscription to the host event signals.
///
/// Registered when the service starts; closing the [`Handle`] ends the
/// stream and releases the subscription.
pub struct HostSignals {
    signals: Signals,
    handle: Handle,
}

impl HostSignals {
    pub fn register() -> std::io::Result<Self> {
        let signals = Signals::new([SIGUSR1, SIGUSR2])?;
        let handle = signals.handle();
        info!("Listening for SIGUSR1 (wake) and SIGUSR2 (press)");
        Ok(Self { signals, handle })
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    pub fn into_stream(self) -> Signals {
        self.signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_user_signals() {
        assert_eq!(HostEvent::from_signal(SIGUSR1), Some(HostEvent::Wake));
        assert_eq!(HostEvent::from_signal(SIGUSR2), Some(HostEvent::Press));
        assert_eq!(HostEvent::from_signal(SIGTERM), None);
    }
}
