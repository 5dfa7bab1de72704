//! Forgot-password relay.
//!
//! `POST /api/forgot-password` forwards the caller's email to the backend's
//! `/forgot-password` and hands back whatever status and JSON body the
//! backend produced. The email value is forwarded as sent, whatever its
//! type. Nothing is validated, retried or rewritten here. Any failure on
//! this side of the hop becomes `500 {"error": ...}`.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod tests;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use client::net::types::ForgotPasswordRequest;
use serde_json::Value;

use crate::state::AppState;

const BACKEND_PATH: &str = "/forgot-password";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("malformed request: {0}")]
    MalformedRequest(serde_json::Error),
    #[error("malformed request: body is null")]
    NullRequest,
    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("backend reply was not JSON: {0}")]
    MalformedReply(serde_json::Error),
}

/// `POST /api/forgot-password`: relay to the backend.
///
/// The body is taken as raw bytes so a malformed request surfaces as the
/// relay's own 500 rather than an extractor rejection.
pub async fn forgot_password(State(state): State<AppState>, body: Bytes) -> Response {
    match relay(&state, &body).await {
        Ok((status, reply)) => {
            tracing::info!(status = status.as_u16(), "forgot-password relayed");
            (status, Json(reply)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "forgot-password relay failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

async fn relay(state: &AppState, body: &[u8]) -> Result<(StatusCode, Value), RelayError> {
    let body: Value = serde_json::from_slice(body).map_err(RelayError::MalformedRequest)?;
    if body.is_null() {
        return Err(RelayError::NullRequest);
    }
    // Non-object bodies have no `email` and forward as `{}`.
    let request = ForgotPasswordRequest { email: body.get("email").cloned() };

    let response = state
        .http
        .post(format!("{}{BACKEND_PATH}", state.backend_url))
        .json(&request)
        .send()
        .await?;

    let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let bytes = response.bytes().await?;
    let reply = serde_json::from_slice(&bytes).map_err(RelayError::MalformedReply)?;
    Ok((status, reply))
}
