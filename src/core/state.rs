//! Process-wide shutdown state.
//!
//! Ctrl+C sets `SHUTDOWN`. Once the dev server has registered a shutdown
//! channel the handler only signals it; before that the process exits.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::Sender;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Shutdown signal sender for the dev server
static SHUTDOWN_TX: OnceLock<Sender<()>> = OnceLock::new();

/// Setup the global Ctrl+C handler. Call once at program start.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        match SHUTDOWN_TX.get() {
            Some(tx) => {
                let _ = tx.send(());
            }
            // Nothing to shut down gracefully (build, toc, params)
            None => std::process::exit(130),
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Route Ctrl+C to `tx` instead of exiting. Only the first call takes effect.
pub fn register_shutdown(tx: Sender<()>) {
    let _ = SHUTDOWN_TX.set(tx);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    #[test]
    fn test_registered_channel_receives_signal() {
        let (tx, rx) = channel::unbounded();
        register_shutdown(tx);
        if let Some(tx) = SHUTDOWN_TX.get() {
            tx.send(()).unwrap();
        }
        assert!(rx.try_recv().is_ok());
        assert!(!is_shutdown());
    }
}
