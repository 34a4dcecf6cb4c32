//! Book operations on top of a `BookStore`.

use crate::error::AppError;
use crate::model::{Book, NewBook};
use crate::store::BookStore;

/// Human-readable code for the `seq`-th book: `B` followed by at least five digits.
pub fn book_code(seq: i64) -> String {
    format!("B{:05}", seq)
}

pub struct BookService<S> {
    store: S,
}

impl<S: BookStore> BookService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn list(&self) -> Result<Vec<Book>, AppError> {
        self.store.list_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Book, AppError> {
        self.store.get_by_id(id).await
    }

    /// Assign the next code and insert in a transaction.
    ///
    /// The row count is read before the transaction opens, so two concurrent creates can
    /// receive the same code. Rollback is best-effort: if it fails, the failure is logged
    /// and the insert error is returned. A failed commit consumes the transaction; the
    /// driver rolls it back on drop.
    pub async fn create(&self, book: NewBook) -> Result<Book, AppError> {
        let existing = self.store.count().await?;
        let code = book_code(existing + 1);

        let mut tx = self.store.begin().await?;
        let row = match self.store.insert(&mut tx, &book, &code).await {
            Ok(row) => row,
            Err(e) => {
                if let Err(rollback_err) = self.store.rollback(tx).await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                return Err(e);
            }
        };
        self.store.commit(tx).await?;
        tracing::info!(id = row.id, code = %row.code, "book created");
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryBookStore;
    use std::sync::Arc;
    use tokio::sync::Barrier;

    fn new_book(name: &str) -> NewBook {
        NewBook {
            name: name.into(),
            author: "anon".into(),
            is_archived: false,
        }
    }

    #[test]
    fn codes_are_zero_padded_to_five_digits() {
        assert_eq!(book_code(1), "B00001");
        assert_eq!(book_code(42), "B00042");
        assert_eq!(book_code(99_999), "B99999");
        assert_eq!(book_code(100_000), "B100000");
    }

    #[tokio::test]
    async fn sequential_creates_get_sequential_codes() {
        let service = BookService::new(MemoryBookStore::new());
        let mut codes = Vec::new();
        for i in 0..12 {
            let book = service.create(new_book(&format!("book {i}"))).await.unwrap();
            codes.push(book.code);
        }
        let expected: Vec<String> = (1..=12).map(book_code).collect();
        assert_eq!(codes, expected);

        let listed: Vec<String> = service.list().await.unwrap().into_iter().map(|b| b.code).collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn created_book_can_be_read_back() {
        let service = BookService::new(MemoryBookStore::new());
        let created = service
            .create(NewBook {
                name: "Dune".into(),
                author: "Frank Herbert".into(),
                is_archived: true,
            })
            .await
            .unwrap();
        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Dune");
        assert_eq!(fetched.author, "Frank Herbert");
        assert!(fetched.is_archived);
    }

    #[tokio::test]
    async fn missing_book_is_a_no_rows_error() {
        let service = BookService::new(MemoryBookStore::new());
        let err = service.get(404).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_and_persists_nothing() {
        let service = BookService::new(MemoryBookStore::new());
        service.store().fail_inserts(true);
        assert!(service.create(new_book("lost")).await.is_err());
        assert_eq!(service.store().len(), 0);

        service.store().fail_inserts(false);
        let book = service.create(new_book("kept")).await.unwrap();
        assert_eq!(book.code, "B00001");
    }

    #[tokio::test]
    async fn rollback_failure_keeps_the_insert_error() {
        let service = BookService::new(MemoryBookStore::new());
        service.store().fail_inserts(true);
        service.store().fail_rollbacks(true);
        let err = service.create(new_book("lost")).await.unwrap_err();
        assert_eq!(err.to_string(), "encountered unexpected or invalid data: insert rejected");
    }

    #[tokio::test]
    async fn commit_failure_is_returned_and_persists_nothing() {
        let service = BookService::new(MemoryBookStore::new());
        service.store().fail_commits(true);
        let err = service.create(new_book("lost")).await.unwrap_err();
        assert_eq!(err.to_string(), "encountered unexpected or invalid data: commit rejected");
        assert_eq!(service.store().len(), 0);

        service.store().fail_commits(false);
        let book = service.create(new_book("kept")).await.unwrap();
        assert_eq!(book.code, "B00001");
    }

    // Known race: the count is read outside the insert transaction.
    #[tokio::test]
    async fn concurrent_creates_can_share_a_code() {
        let barrier = Arc::new(Barrier::new(2));
        let service = Arc::new(BookService::new(MemoryBookStore::with_count_barrier(barrier)));

        let (a, b) = tokio::join!(
            {
                let service = Arc::clone(&service);
                async move { service.create(new_book("first")).await }
            },
            {
                let service = Arc::clone(&service);
                async move { service.create(new_book("second")).await }
            }
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.id, b.id);
        assert_eq!(a.code, "B00001");
        assert_eq!(b.code, "B00001");
    }
}
