//! Common routes: welcome, health, readiness, version.

use crate::handlers::common::{health, ready, version, welcome};
use crate::state::AppState;
use crate::store::BookStore;
use axum::{routing::get, Router};

/// GET /, GET /health, GET /ready, GET /version.
pub fn common_routes<S: BookStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/ready", get(ready::<S>))
        .route("/version", get(version))
        .with_state(state)
}
