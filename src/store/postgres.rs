//! PostgreSQL `BookStore` over a shared sqlx pool.

use super::BookStore;
use crate::config::DatabaseSettings;
use crate::error::AppError;
use crate::model::{Book, NewBook};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

const BOOK_COLUMNS: &str = "id, code, name, auther, is_archived, created_at, updated_at";

/// Open the shared pool. The caller decides whether a failure is fatal.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(settings.connect_options())
        .await
}

#[derive(Clone, Debug)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    type Tx = Transaction<'static, Postgres>;

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Book>, AppError> {
        let sql = format!("SELECT {} FROM books", BOOK_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Book, AppError> {
        let sql = format!("SELECT {} FROM books WHERE books.id = $1", BOOK_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn begin(&self) -> Result<Self::Tx, AppError> {
        let tx = self.pool.begin().await?;
        tracing::debug!("begin transaction");
        Ok(tx)
    }

    async fn insert(&self, tx: &mut Self::Tx, book: &NewBook, code: &str) -> Result<Book, AppError> {
        let sql = format!(
            "INSERT INTO books (code, name, auther, is_archived) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, code, "query (tx)");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(code)
            .bind(&book.name)
            .bind(&book.author)
            .bind(book.is_archived)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), AppError> {
        tx.commit().await?;
        tracing::debug!("commit transaction");
        Ok(())
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), AppError> {
        tx.rollback().await?;
        tracing::debug!("rollback transaction");
        Ok(())
    }
}
