//! Routes mounted under /api.

use crate::handlers::book::{create, delete, list, read, update};
use crate::handlers::common::{king, ping};
use crate::state::AppState;
use crate::store::BookStore;
use axum::{routing::get, Router};

pub fn api_routes<S: BookStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/king", get(king))
        .route("/books", get(list::<S>).post(create::<S>))
        .route("/books/", get(list::<S>).post(create::<S>))
        .route("/books/:id", get(read::<S>).put(update).delete(delete))
        .with_state(state)
}
