//! # mockid-api — Axum Service for the Mock Identity System
//!
//! A stand-in identity backend for authentication and eSignet integration
//! tests. Identity records and verified claims live in an in-memory store
//! for the lifetime of the process.
//!
//! ## API Surface
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `{ctx}/identity` | [`routes::identity::create_identity`] |
//! | GET | `{ctx}/identity/{individualId}` | [`routes::identity::get_identity`] |
//! | PUT | `{ctx}/identity` | [`routes::identity::update_identity`] |
//! | POST | `{ctx}/identity/add-verified-claim` | [`routes::identity::add_verified_claim`] |
//! | GET | `{ctx}/identity/{individualId}/verified-claims` | [`routes::identity::get_verified_claims`] |
//! | GET | `/health/liveness`, `/health/readiness` | probes |
//! | GET | `/openapi.json` | [`openapi::ApiDoc`] |
//!
//! `{ctx}` is the configured context path (empty by default).
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Request bodies above this size are rejected. Encoded photos are the
/// largest field in practice.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let identity = routes::identity::router();
    let identity = if state.config.context_path.is_empty() {
        identity
    } else {
        Router::new().nest(&state.config.context_path, identity)
    };

    Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .merge(openapi::router())
        .merge(identity)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe. Always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. 200 "ready" once the identity store answers its
/// health check, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check() {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "identity store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "identity store unavailable").into_response()
        }
    }
}
