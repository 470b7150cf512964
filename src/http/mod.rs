//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, access log, in-flight guard)
//!     → handlers.rs (POST / digest, POST /shutdown, 404/405 fallbacks)
//!     → delay.rs (artificial delay before the handler returns)
//!     → Send to client
//! ```

pub mod delay;
pub mod handlers;
pub mod request;
pub mod server;

pub use delay::DelayPolicy;
pub use request::{RequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
