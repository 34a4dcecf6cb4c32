//! Book API server: connects to PostgreSQL, then serves the routes until Ctrl-C.

use bookshelf::{app, connect, telemetry, AppState, BookStore, PgBookStore, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let settings = Settings::from_env()?;
    let pool = connect(&settings.database).await.map_err(|e| {
        tracing::error!(error = %e, db = %settings.database.target(), "db connection failed");
        e
    })?;
    let store = PgBookStore::new(pool.clone());
    store.ping().await?;
    tracing::info!(db = %settings.database.target(), "connected to postgres");

    let app = app(AppState::new(store));
    let listener = TcpListener::bind(&settings.server_address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl+c");
        return;
    }
    tracing::info!("ctrl+c received, shutting down");
}
