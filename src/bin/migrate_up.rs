//! Apply every pending migration. Exits 1 on failure; already up to date is not a failure.

use bookshelf::{migrate_up, telemetry, MigrationOutcome, Settings};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let settings = Settings::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    });

    match migrate_up(&settings).await {
        Ok(MigrationOutcome::NoChange) => tracing::info!("migration is up to date"),
        Ok(MigrationOutcome::Changed(versions)) => {
            tracing::info!(?versions, "database migrated up successfully")
        }
        Err(e) => {
            tracing::error!(error = %e, dir = ?settings.migrations_dir, "migration up error");
            std::process::exit(1);
        }
    }
}
