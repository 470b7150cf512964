//! Per-request plumbing applied before any handler runs.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) in `x-request-id`
//! - Log every request (peer, method, uri, request ID)
//! - Hold an in-flight guard for the whole request, delay included

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::lifecycle::InFlight;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Log the request and count it as in flight until the response is ready.
pub async fn track_requests(
    State(in_flight): State<InFlight>,
    request: Request,
    next: Next,
) -> Response {
    let _guard = in_flight.track();

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::info!(
        request_id = %request_id,
        peer = %peer,
        method = %request.method(),
        uri = %request.uri(),
        in_flight = in_flight.count(),
        "Request received"
    );

    let response = next.run(request).await;

    tracing::debug!(
        request_id = %request_id,
        status = response.status().as_u16(),
        "Request completed"
    );
    response
}
