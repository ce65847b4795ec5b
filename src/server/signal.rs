// Shutdown and signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown (Unix only)

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Cloneable handle used to stop a running server
///
/// A request made before the accept loop starts waiting is not lost.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
    requested: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the server to stop accepting connections
    pub fn shutdown(&self) {
        self.requested.store(true, Ordering::SeqCst);
        // notify_one keeps a permit if nobody is waiting yet
        self.notify.notify_one();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Resolve once shutdown has been requested
    pub async fn wait(&self) {
        if self.is_shutdown_requested() {
            return;
        }
        self.notify.notified().await;
    }
}

/// Bridge OS termination signals to `handle`
///
/// Spawns a background task; when SIGINT (or SIGTERM on Unix) arrives the
/// handle is triggered exactly as a programmatic shutdown would be.
pub fn spawn_signal_handler(handle: ShutdownHandle) {
    tokio::spawn(forward_shutdown(wait_for_signal(), handle));
}

/// Trigger `handle` once `signal` yields a signal name
///
/// `None` means the listener could not be installed; the server then keeps
/// running until stopped some other way.
async fn forward_shutdown<F>(signal: F, handle: ShutdownHandle)
where
    F: Future<Output = Option<&'static str>>,
{
    if let Some(name) = signal.await {
        logger::log_shutdown_signal(name);
        handle.shutdown();
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> Option<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                res = tokio::signal::ctrl_c() => ctrl_c_result(res),
                _ = sigterm.recv() => Some("SIGTERM"),
            }
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            ctrl_c_result(tokio::signal::ctrl_c().await)
        }
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
async fn wait_for_signal() -> Option<&'static str> {
    ctrl_c_result(tokio::signal::ctrl_c().await)
}

fn ctrl_c_result(res: std::io::Result<()>) -> Option<&'static str> {
    match res {
        Ok(()) => Some("SIGINT"),
        Err(e) => {
            logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
            None
        }
    }
}
