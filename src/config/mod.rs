//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → config file (TOML, optional) via loader.rs
//!     → validation.rs (semantic checks)
//!     → command-line overrides (main.rs)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CredentialsConfig, DelayConfig, ListenerConfig, ObservabilityConfig, ServerConfig,
    ShutdownConfig,
};
pub use validation::{validate_config, ValidationError};
