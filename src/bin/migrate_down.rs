//! Revert the latest migration, or all of them with `--all`. Exits 1 on failure.

use bookshelf::{migrate_down, telemetry, MigrationOutcome, RevertScope, Settings};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "migrate-down")]
#[command(about = "Reverts applied schema migrations", long_about = None)]
struct Cli {
    /// Revert every applied migration instead of only the latest.
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let settings = Settings::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    });
    let scope = if args.all { RevertScope::All } else { RevertScope::Latest };

    match migrate_down(&settings, scope).await {
        Ok(MigrationOutcome::NoChange) => tracing::info!("no migration to revert"),
        Ok(MigrationOutcome::Changed(versions)) => {
            tracing::info!(?versions, "database migrated down successfully")
        }
        Err(e) => {
            tracing::error!(error = %e, dir = ?settings.migrations_dir, "migration down error");
            std::process::exit(1);
        }
    }
}
