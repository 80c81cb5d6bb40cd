//! Graceful shutdown handling
//!
//! A [`ShutdownSignal`] is a latch shared between the HTTP server task, the
//! OS signal listener and whoever owns the [`ShutdownCoordinator`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};

/// Cloneable one-way latch. Once triggered it stays triggered.
#[derive(Clone)]
pub struct ShutdownSignal {
    state: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.state.borrow()
    }

    pub fn trigger(&self) {
        if !self.state.send_replace(true) {
            info!("🛑 Shutdown signal triggered");
        }
    }

    /// Resolves once the latch is set, immediately if it already is.
    pub async fn wait(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for SIGINT (Ctrl+C) or, on Unix, SIGTERM, then trigger `shutdown`.
pub async fn listen_for_shutdown_signals(shutdown: ShutdownSignal) {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("📡 Received SIGINT signal (Ctrl+C)"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("📡 Received SIGTERM signal");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = shutdown.wait() => return,
    }

    shutdown.trigger();
}

/// Owns the process-wide shutdown latch and the drain timeout.
pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    drain_timeout: Duration,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            drain_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// How long in-flight requests get to finish once shutdown starts.
    pub fn timeout(&self) -> Duration {
        self.drain_timeout
    }

    pub fn start_signal_listener(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.signal()));
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(30)
    }
}
