//! Observability: structured logging only.

pub mod logging;
