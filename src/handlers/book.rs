//! Book handlers: list, read, create, plus the update/delete stubs.

use crate::error::AppError;
use crate::model::{Book, NewBook};
use crate::state::AppState;
use crate::store::BookStore;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|source| AppError::InvalidId {
        input: id_str.to_string(),
        source,
    })
}

pub async fn list<S: BookStore>(State(state): State<AppState<S>>) -> Result<Json<Vec<Book>>, AppError> {
    let rows = state.books.list().await?;
    Ok(Json(rows))
}

pub async fn read<S: BookStore>(
    State(state): State<AppState<S>>,
    Path(id_str): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.books.get(id).await?;
    Ok(Json(row))
}

pub async fn create<S: BookStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<Json<Book>, AppError> {
    // Decoded whatever the Content-Type header says.
    let body: NewBook = serde_json::from_slice(&body).map_err(AppError::InvalidJson)?;
    let row = state.books.create(body).await?;
    Ok(Json(row))
}

pub async fn update() -> &'static str {
    "book update"
}

pub async fn delete() -> &'static str {
    "book delete"
}
