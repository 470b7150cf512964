//! cryptserver
//!
//! ```text
//!     Client Request
//!     ──────────────▶ listener ─▶ request.rs ─▶ handlers ─▶ delay ─▶ response
//!                                                   │
//!                                   /shutdown ok ───┤
//!     SIGINT ──────────────────────────────────────▶ Shutdown ─▶ Coordinator
//!                                                                  │
//!                                 stop accepting ◀─────────────────┤
//!                                 drain (≤ 3 × delay) ◀────────────┘
//! ```
//!
//! SIGTERM and SIGKILL are not intercepted and end the process at once.

use clap::Parser;

use cryptserver::cli::Cli;
use cryptserver::lifecycle::{signals, startup, DrainOutcome, Shutdown};
use cryptserver::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().resolve()?;

    logging::init(&config.observability.log_level);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cryptserver starting");
    let drain_timeout_ms = u64::try_from(config.drain_timeout().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        delay_ms = config.delay.response_ms,
        drain_timeout_ms,
        credentials = %config.credentials.path.display(),
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::listen_for_interrupt(shutdown.clone());

    let started = startup::start(config, shutdown).await?;
    let outcome = started.server.run(started.listener).await?;

    match outcome {
        DrainOutcome::Completed => tracing::info!("Shutdown complete"),
        DrainOutcome::TimedOut { abandoned } => {
            tracing::warn!(abandoned, "Shutdown complete, in-flight requests were cut off")
        }
    }
    Ok(())
}
