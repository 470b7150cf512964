//! Shutdown coordinator: `Running → Draining → Stopped`.
//!
//! The coordinator owns the drain. It hands `axum::serve` a graceful-shutdown
//! future that resolves on the first termination signal, at which point the
//! accept loop stops and the listener is dropped. Accepted connections keep
//! running (artificial delay included) until they finish or the drain
//! timeout elapses, whichever comes first.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::lifecycle::inflight::InFlight;
use crate::lifecycle::shutdown::{Shutdown, ShutdownReason};

/// Lifecycle phase of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting connections.
    Running,
    /// Refusing new connections, waiting for accepted ones.
    Draining,
    /// Terminal.
    Stopped,
}

/// How the drain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every accepted request finished.
    Completed,
    /// The drain timeout elapsed first; `abandoned` requests were still in flight.
    TimedOut { abandoned: u64 },
}

/// Drives a server future through the shutdown state machine.
#[derive(Debug, Clone)]
pub struct Coordinator {
    shutdown: Shutdown,
    in_flight: InFlight,
    drain_timeout: Duration,
    phase: Arc<watch::Sender<Phase>>,
}

impl Coordinator {
    pub fn new(shutdown: Shutdown, in_flight: InFlight, drain_timeout: Duration) -> Self {
        let (phase, _) = watch::channel(Phase::Running);
        Self {
            shutdown,
            in_flight,
            drain_timeout,
            phase: Arc::new(phase),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Subscribe to phase transitions.
    pub fn watch_phase(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    pub fn drain_timeout(&self) -> Duration {
        self.drain_timeout
    }

    /// Future for `with_graceful_shutdown`. Resolves on the first
    /// termination signal and moves the coordinator to `Draining`.
    pub fn graceful_signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let this = self.clone();
        async move {
            let reason = this.shutdown.triggered().await;
            this.enter_draining(reason);
        }
    }

    /// Run `serve` until the termination signal, then bound its drain by the
    /// drain timeout.
    ///
    /// `serve` must be a server future wired to [`Coordinator::graceful_signal`].
    /// A timed-out drain is reported through the returned outcome, not as an
    /// error; only transport errors from `serve` itself are errors.
    pub async fn drive<F>(&self, serve: F) -> std::io::Result<DrainOutcome>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        tokio::pin!(serve);

        let reason = tokio::select! {
            result = &mut serve => {
                self.enter_stopped();
                result?;
                return Ok(DrainOutcome::Completed);
            }
            reason = self.shutdown.triggered() => reason,
        };
        self.enter_draining(reason);

        let outcome = match tokio::time::timeout(self.drain_timeout, &mut serve).await {
            Ok(result) => {
                self.enter_stopped();
                result?;
                tracing::info!("All in-flight requests completed");
                DrainOutcome::Completed
            }
            Err(_) => {
                let abandoned = self.in_flight.count();
                tracing::warn!(
                    timeout_ms = self.drain_timeout_ms(),
                    abandoned,
                    "Drain timed out, forcing shutdown"
                );
                self.enter_stopped();
                DrainOutcome::TimedOut { abandoned }
            }
        };
        Ok(outcome)
    }

    fn drain_timeout_ms(&self) -> u64 {
        u64::try_from(self.drain_timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn enter_draining(&self, reason: ShutdownReason) {
        let entered = self.phase.send_if_modified(|phase| {
            if *phase != Phase::Running {
                return false;
            }
            *phase = Phase::Draining;
            true
        });
        if entered {
            tracing::info!(
                reason = %reason,
                in_flight = self.in_flight.count(),
                timeout_ms = self.drain_timeout_ms(),
                "Shutdown started, draining connections"
            );
        }
    }

    fn enter_stopped(&self) {
        self.phase.send_replace(Phase::Stopped);
    }
}
