//! Router assembly.

mod book;
mod common;

pub use book::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use crate::store::BookStore;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const BODY_LIMIT: usize = 64 * 1024;

/// Full application: common routes at the root, book API under /api, request logging on everything.
pub fn app<S: BookStore>(state: AppState<S>) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}
