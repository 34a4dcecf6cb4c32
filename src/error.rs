//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid id {input:?}: {source}")]
    InvalidId {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid json request")]
    InvalidJson(#[source] serde_json::Error),
}

impl AppError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Db(sqlx::Error::RowNotFound) => "not_found",
            AppError::Db(_) => "database_error",
            AppError::InvalidId { .. } => "invalid_id",
            AppError::InvalidJson(_) => "invalid_json",
        }
    }

    /// True when the store found no row for the requested key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Db(sqlx::Error::RowNotFound))
    }
}

/// Errors are written in place of the result: status 200 and the message as a JSON string.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidJson(source) => {
                tracing::warn!(kind = self.kind(), error = %source, "request failed")
            }
            _ => tracing::warn!(kind = self.kind(), error = %self, "request failed"),
        }
        (StatusCode::OK, Json(self.to_string())).into_response()
    }
}

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("error when trying to connect: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("migration files not found: {0}")]
    Source(#[source] sqlx::migrate::MigrateError),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
