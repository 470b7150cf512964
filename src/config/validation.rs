//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (multiplier ≥ 1, body limit > 0)
//! - Check the bind address parses as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("listener.max_body_bytes must be greater than zero")]
    BodyLimit,

    #[error("shutdown.timeout_multiplier must be at least 1")]
    TimeoutMultiplier,

    #[error("credentials.path must not be empty")]
    CredentialsPath,
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::BodyLimit);
    }
    if config.shutdown.timeout_multiplier == 0 {
        errors.push(ValidationError::TimeoutMultiplier);
    }
    if config.credentials.path.as_os_str().is_empty() {
        errors.push(ValidationError::CredentialsPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
