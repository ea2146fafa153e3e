//! Host signal listener task

use std::sync::Arc;
use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{debug, info, warn};

use crate::{state::AppState, utils::HostEvent};

/// Forward SIGUSR1/SIGUSR2 to the sleep timer until the subscription closes
pub async fn host_signal_task(state: Arc<AppState>, mut signals: Signals) {
    info!("Starting host signal task");

    while let Some(signal) = signals.next().await {
        let result = match HostEvent::from_signal(signal) {
            Some(HostEvent::Wake) => state.wake("SIGUSR1").await,
            Some(HostEvent::Press) => state.press("SIGUSR2").await,
            None => {
                debug!("Ignoring signal {}", signal);
                continue;
            }
        };

        if let Err(e) = result {
            warn!("Failed to forward signal {}: {}", signal, e);
        }
    }

    info!("Host signal subscription closed");
}
