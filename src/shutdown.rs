// Signal-driven shutdown for the HTTP and stdio transports

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown flag shared by the signal thread and the transports.
///
/// Clones observe the same flag; waiters are woken once when it flips.
#[derive(Clone, Default)]
pub struct ShutdownState {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag and wake every waiter. Repeated calls are no-ops.
    pub fn request_shutdown(&self) {
        if !self.requested.swap(true, Ordering::SeqCst) {
            log::info!("Shutdown requested");
            self.notify.notify_waiters();
        }
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Resolves once a shutdown has been requested
    pub async fn wait_for_shutdown(&self) {
        loop {
            // Register before checking so a request in between is not missed
            let notified = self.notify.notified();
            if self.is_shutdown_requested() {
                return;
            }
            notified.await;
        }
    }
}

/// Request shutdown on SIGINT, SIGTERM, or SIGHUP
#[cfg(unix)]
pub fn register_signal_handlers(state: ShutdownState) -> Result<()> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use signal_hook::low_level::signal_name;

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("Failed to register signal handlers")?;

    std::thread::Builder::new()
        .name("git-tools-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                log::info!("Received {}", signal_name(signal).unwrap_or("signal"));
                state.request_shutdown();
            }
        })
        .context("Failed to spawn signal thread")?;

    Ok(())
}

/// Request shutdown on Ctrl+C
#[cfg(windows)]
pub fn register_signal_handlers(state: ShutdownState) -> Result<()> {
    ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C");
        state.request_shutdown();
    })
    .context("Failed to register Ctrl+C handler")
}
