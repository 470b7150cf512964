//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with both handlers and the fallbacks
//! - Wire up middleware (tracing, request ID, in-flight tracking) and the body limit
//! - Bind the router to a listener and run it under the shutdown coordinator

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::delay::DelayPolicy;
use crate::http::handlers::{digest_handler, method_not_allowed, not_found, shutdown_handler};
use crate::http::request::{track_requests, RequestUuid};
use crate::lifecycle::{Coordinator, DrainOutcome, InFlight, Shutdown};
use crate::security::CredentialSet;

/// Application state injected into handlers.
///
/// Everything a handler needs is passed here explicitly; nothing is looked
/// up from request extensions.
#[derive(Clone)]
pub struct AppState {
    pub delay: DelayPolicy,
    pub credentials: Arc<CredentialSet>,
    pub shutdown: Shutdown,
}

/// HTTP server for the digest service.
pub struct HttpServer {
    router: Router,
    coordinator: Coordinator,
}

impl HttpServer {
    /// Create a new HTTP server.
    ///
    /// `shutdown` is the termination signal shared with the interrupt
    /// listener; the shutdown endpoint raises it too.
    pub fn new(config: ServerConfig, credentials: CredentialSet, shutdown: Shutdown) -> Self {
        let in_flight = InFlight::new();
        let coordinator = Coordinator::new(shutdown.clone(), in_flight.clone(), config.drain_timeout());

        let state = AppState {
            delay: DelayPolicy::new(config.response_delay()),
            credentials: Arc::new(credentials),
            shutdown,
        };

        let router = Self::build_router(&config, state, in_flight);
        Self {
            router,
            coordinator,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The body limit is enforced by the `Form` extractor, so an oversized
    /// body reaches the handler as an unreadable form and is delayed like
    /// any other rejection.
    fn build_router(config: &ServerConfig, state: AppState, in_flight: InFlight) -> Router {
        Router::new()
            .route("/", post(digest_handler).fallback(method_not_allowed))
            .route("/shutdown", post(shutdown_handler).fallback(method_not_allowed))
            .fallback(not_found)
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .with_state(state)
            .layer(middleware::from_fn_with_state(in_flight, track_requests))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
    }

    /// The router, for driving the service without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The coordinator this server runs under. Clone it before [`run`](Self::run)
    /// to observe phase transitions.
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Serve on `listener` until the termination signal, then drain.
    pub async fn run(self, listener: TcpListener) -> Result<DrainOutcome, std::io::Error> {
        let addr = listener.local_addr()?;
        let drain_timeout_ms =
            u64::try_from(self.coordinator.drain_timeout().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            address = %addr,
            drain_timeout_ms,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(self.coordinator.graceful_signal())
            .into_future();

        let outcome = self.coordinator.drive(serve).await?;

        tracing::info!(outcome = ?outcome, "HTTP server stopped");
        Ok(outcome)
    }
}
