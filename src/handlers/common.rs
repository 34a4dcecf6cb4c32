//! Plain-text greetings and health checks, plus readiness and version.

use crate::state::AppState;
use crate::store::BookStore;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

pub async fn welcome() -> &'static str {
    "welcome"
}

pub async fn health() -> &'static str {
    "check"
}

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn king() -> &'static str {
    "kong"
}

pub async fn ready<S: BookStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.books.store().ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
