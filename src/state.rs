//! Shared application state for all routes.

use crate::service::BookService;
use crate::store::BookStore;
use std::sync::Arc;

pub struct AppState<S> {
    pub books: Arc<BookService<S>>,
}

impl<S: BookStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            books: Arc::new(BookService::new(store)),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
        }
    }
}
