//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load credentials → Build server → Bind listener
//!
//! Shutdown (shutdown.rs, coordinator.rs):
//!     SIGINT or authenticated /shutdown → Stop accepting → Drain → Exit
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger graceful shutdown
//!     SIGTERM/SIGKILL → default disposition, no drain
//! ```
//!
//! # Design Decisions
//! - One termination signal per process; first trigger wins
//! - Drain is bounded by a timeout derived from the response delay
//! - A timed-out drain is logged and reported, the process still exits 0

pub mod coordinator;
pub mod inflight;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use coordinator::{Coordinator, DrainOutcome, Phase};
pub use inflight::{InFlight, InFlightGuard};
pub use shutdown::{Shutdown, ShutdownReason};
