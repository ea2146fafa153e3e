//! Sleep Remote - a remote-driven sleep timer
//!
//! This is the main entry point for the sleep-remote service.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use sleep_remote::{
    api::create_router,
    config::Config,
    services::{
        check_command_available, CommandSink, CommandTemplate, CommandTimeoutWriter, Dispatcher,
        LogSink, NotificationSink,
    },
    state::AppState,
    tasks::{host_signal_task, sleep_timer_task},
    utils::{shutdown_signal, HostSignals},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("sleep_remote={},tower_http=info", config.log_level()))
        .init();

    info!("Starting sleep-remote v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, debounce={}ms, short={}ms, normal={}ms",
        config.host,
        config.port,
        config.debounce_ms,
        config.short_timeout_ms,
        config.normal_timeout_ms
    );

    let timeout_template = CommandTemplate::parse(&config.timeout_command)?;
    if let Err(e) = check_command_available(&timeout_template).await {
        // keep running: a failing writer only disables the sleep/restore effect
        warn!("Screen timeout command unavailable: {}", e);
    }

    let sink: Arc<dyn NotificationSink> = match &config.notify_command {
        Some(command) => Arc::new(CommandSink::new(CommandTemplate::parse(command)?)),
        None => Arc::new(LogSink),
    };
    let dispatcher = Dispatcher::new(
        Arc::new(CommandTimeoutWriter::new(timeout_template)),
        sink,
        config.timeout_settings(),
    );

    // A previous run may have exited with the short timeout still applied
    if config.restore_on_start() {
        match dispatcher.restore_now().await {
            Ok(()) => info!("Normal screen timeout restored at start-up"),
            Err(e) => warn!("Failed to restore screen timeout at start-up: {}", e),
        }
    }

    // Create application state and start the sleep timer task
    let policy = config.timer_policy()?;
    let (state, commands) = AppState::new(config.port, config.host.clone(), policy);
    let state = Arc::new(state);
    let timer_task = tokio::spawn(sleep_timer_task(Arc::clone(&state), commands, dispatcher));

    // Wake/press subscription lives until shutdown
    let host_signals = HostSignals::register()?;
    let host_signals_handle = host_signals.handle();
    let signal_task = tokio::spawn(host_signal_task(
        Arc::clone(&state),
        host_signals.into_stream(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state), config.cycle_key);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /press  - Cycle button press");
    info!("  POST /key    - Raw key event (cycle key {} press-down only)", config.cycle_key);
    info!("  POST /wake   - Display turned on");
    info!("  GET  /status - Current preset and countdown");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    host_signals_handle.close();
    if let Err(e) = signal_task.await {
        warn!("Host signal task ended abnormally: {}", e);
    }

    if let Err(e) = state.stop().await {
        warn!("Failed to stop sleep timer: {}", e);
    }
    if let Err(e) = timer_task.await {
        warn!("Sleep timer task ended abnormally: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
