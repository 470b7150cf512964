//! OS signal handling.
//!
//! Only SIGINT (Ctrl-C) is translated into a graceful shutdown. SIGTERM and
//! SIGKILL keep their default disposition: the process dies immediately,
//! no drain runs and in-flight requests are lost. That asymmetry is
//! intentional and is covered by the process-level tests.

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{Shutdown, ShutdownReason};

/// Spawn a task that raises `shutdown` on every SIGINT.
///
/// The first interrupt starts the drain; later ones are logged and ignored,
/// they neither restart nor hurry the sequence already under way.
pub fn listen_for_interrupt(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for interrupt signal");
                return;
            }

            if shutdown.trigger(ShutdownReason::Interrupt) {
                tracing::info!("Interrupt received");
            } else {
                tracing::info!(
                    reason = ?shutdown.reason(),
                    "Interrupt received while already shutting down, ignoring"
                );
            }
        }
    })
}
