//! Bookshelf: book REST service on PostgreSQL, plus schema migration helpers.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{DatabaseSettings, Settings};
pub use error::{AppError, ConfigError, MigrationError};
pub use migration::{migrate_down, migrate_up, MigrationOutcome, RevertScope};
pub use model::{Book, NewBook};
pub use routes::{api_routes, app, common_routes};
pub use service::{book_code, BookService};
pub use state::AppState;
pub use store::{connect, BookStore, PgBookStore};
