//! Password digest service with authenticated graceful shutdown.
//!
//! `POST /` returns the SHA-512/base64 digest of a form-supplied password.
//! `POST /shutdown` checks a password against a credential file and, when it
//! matches, drains and stops the server. Every response is held back by a
//! fixed artificial delay, and a drain waits for delayed requests.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::{DrainOutcome, Phase, Shutdown, ShutdownReason};
