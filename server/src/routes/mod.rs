//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site server exposes the forgot-password relay and read-only catalog
//! JSON under `/api`, plus a health probe. Every other backend call goes
//! straight from the client to the backend.

pub mod forgot_password;
pub mod products;

use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Full site router with CORS and request tracing applied.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/forgot-password", post(forgot_password::forgot_password))
        .route("/api/products", get(products::list_products))
        .route("/api/categories", get(products::list_categories))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
