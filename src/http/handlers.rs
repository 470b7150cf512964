//! Request handlers.
//!
//! Each handler builds its response first and then awaits the delay policy
//! before returning it, on every path (200, 400, 401, 404, 405, 409). Only
//! the shutdown handler touches shared state, and only through the
//! single-delivery [`Shutdown`](crate::lifecycle::Shutdown) signal.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::http::server::AppState;
use crate::lifecycle::ShutdownReason;
use crate::security::digest;

/// Form body shared by both endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

/// A missing or unreadable form is treated as an empty password.
fn password_field(form: Result<Form<PasswordForm>, FormRejection>) -> String {
    match form {
        Ok(Form(form)) => form.password,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable form body");
            String::new()
        }
    }
}

/// `POST /`: reply with the digest of the `password` field.
pub async fn digest_handler(
    State(state): State<AppState>,
    form: Result<Form<PasswordForm>, FormRejection>,
) -> Response {
    let password = password_field(form);

    let response = if password.is_empty() {
        (
            StatusCode::BAD_REQUEST,
            "Request must provide password to be hashed\n",
        )
            .into_response()
    } else {
        (StatusCode::OK, format!("{}\n", digest(&password))).into_response()
    };

    state.delay.apply().await;
    response
}

/// `POST /shutdown`: raise the termination signal if the password's digest
/// is in the credential set.
///
/// The signal is raised before the delay so the drain starts immediately
/// and this request is one of the in-flight requests it waits for. A second
/// authenticated request that races the first gets 409; only one caller
/// ever sees 200.
pub async fn shutdown_handler(
    State(state): State<AppState>,
    form: Result<Form<PasswordForm>, FormRejection>,
) -> Response {
    let password = password_field(form);
    let authorized = !password.is_empty() && state.credentials.contains(&digest(&password));

    let response = if !authorized {
        tracing::warn!("Shutdown request rejected: invalid password");
        (StatusCode::UNAUTHORIZED, "Invalid password\n")
    } else if state.shutdown.trigger(ShutdownReason::Authenticated) {
        tracing::info!("Shutdown request authenticated");
        (StatusCode::OK, "Shutting down\n")
    } else {
        tracing::info!("Shutdown request authenticated, but shutdown already in progress");
        (StatusCode::CONFLICT, "Shutdown already in progress\n")
    };

    state.delay.apply().await;
    response.into_response()
}

/// Any unknown path.
pub async fn not_found(State(state): State<AppState>) -> Response {
    state.delay.apply().await;
    (StatusCode::NOT_FOUND, "Invalid path\n").into_response()
}

/// A known path with a method other than POST.
pub async fn method_not_allowed(State(state): State<AppState>) -> Response {
    state.delay.apply().await;
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed\n").into_response()
}
