//! BookService: code assignment and passthrough to the store.

mod book;
pub use book::{book_code, BookService};
