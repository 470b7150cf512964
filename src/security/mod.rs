//! Secret handling subsystem.
//!
//! # Data Flow
//! ```text
//! plaintext secret (form field)
//!     → digest.rs (SHA-512, base64)
//!     → credentials.rs (membership in the loaded set, shutdown only)
//! ```
//!
//! # Design Decisions
//! - Credential set is loaded once and immutable afterwards
//! - Plaintext secrets are never logged or stored

pub mod credentials;
pub mod digest;

pub use credentials::{CredentialError, CredentialSet};
pub use digest::digest;
