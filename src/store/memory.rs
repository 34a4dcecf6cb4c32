//! In-memory `BookStore` for service and router tests.

use super::BookStore;
use crate::error::AppError;
use crate::model::{Book, NewBook};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

#[derive(Default)]
pub(crate) struct MemoryBookStore {
    rows: Mutex<Vec<Book>>,
    next_id: Mutex<i64>,
    fail_inserts: AtomicBool,
    fail_rollbacks: AtomicBool,
    fail_commits: AtomicBool,
    count_barrier: Option<Arc<Barrier>>,
}

/// Rows inserted in a transaction become visible on commit.
pub(crate) struct MemoryTx {
    staged: Vec<Book>,
}

impl MemoryBookStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every `count` call waits on `barrier` after reading, so concurrent creates all see the same count.
    pub(crate) fn with_count_barrier(barrier: Arc<Barrier>) -> Self {
        Self {
            count_barrier: Some(barrier),
            ..Self::default()
        }
    }

    pub(crate) fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_rollbacks(&self, fail: bool) {
        self.fail_rollbacks.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }
}

fn poisoned() -> AppError {
    AppError::Db(sqlx::Error::Protocol("memory store lock poisoned".into()))
}

#[async_trait]
impl BookStore for MemoryBookStore {
    type Tx = MemoryTx;

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.rows.lock().map_err(|_| poisoned())?.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Book, AppError> {
        self.rows
            .lock()
            .map_err(|_| poisoned())?
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = self.rows.lock().map_err(|_| poisoned())?.len() as i64;
        if let Some(barrier) = &self.count_barrier {
            barrier.wait().await;
        }
        Ok(count)
    }

    async fn begin(&self) -> Result<Self::Tx, AppError> {
        Ok(MemoryTx { staged: Vec::new() })
    }

    async fn insert(&self, tx: &mut Self::Tx, book: &NewBook, code: &str) -> Result<Book, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::Protocol("insert rejected".into())));
        }
        let id = {
            let mut next = self.next_id.lock().map_err(|_| poisoned())?;
            *next += 1;
            *next
        };
        let now = Utc::now();
        let row = Book {
            id,
            code: code.to_string(),
            name: book.name.clone(),
            author: book.author.clone(),
            is_archived: book.is_archived,
            created_at: now,
            updated_at: now,
        };
        tx.staged.push(row.clone());
        Ok(row)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), AppError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::Protocol("commit rejected".into())));
        }
        self.rows.lock().map_err(|_| poisoned())?.extend(tx.staged);
        Ok(())
    }

    async fn rollback(&self, _tx: Self::Tx) -> Result<(), AppError> {
        if self.fail_rollbacks.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}
