//! Persistence for the `books` table.

mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::{connect, PgBookStore};

use crate::error::AppError;
use crate::model::{Book, NewBook};
use async_trait::async_trait;

/// Storage handle passed down to the service. Implementations own their connection resources.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Open write transaction.
    type Tx: Send;

    async fn ping(&self) -> Result<(), AppError>;

    /// All rows, in whatever order the backend returns them.
    async fn list_all(&self) -> Result<Vec<Book>, AppError>;

    /// Missing rows surface as `sqlx::Error::RowNotFound`.
    async fn get_by_id(&self, id: i64) -> Result<Book, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn begin(&self) -> Result<Self::Tx, AppError>;

    /// Insert within `tx` and return the stored row.
    async fn insert(&self, tx: &mut Self::Tx, book: &NewBook, code: &str) -> Result<Book, AppError>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), AppError>;

    async fn rollback(&self, tx: Self::Tx) -> Result<(), AppError>;
}
