//! Apply and revert the versioned SQL migrations in the migrations directory.
//! Files are sqlx reversible migrations: `<version>_<description>.up.sql` / `.down.sql`.

use crate::config::Settings;
use crate::error::MigrationError;
use crate::store::connect;
use sqlx::migrate::{Migrate, Migrator};
use sqlx::PgPool;
use std::collections::HashSet;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Versions applied (up) or reverted (down), in the order processed.
    Changed(Vec<i64>),
    /// Already at the target version.
    NoChange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevertScope {
    /// Only the most recently applied migration.
    Latest,
    /// Every applied migration.
    All,
}

/// Load migrations from `dir`. A missing directory is an error, not an empty set.
pub async fn load_migrator(dir: &Path) -> Result<Migrator, MigrationError> {
    Migrator::new(dir).await.map_err(MigrationError::Source)
}

/// Connect with `settings`, then apply every pending migration.
pub async fn migrate_up(settings: &Settings) -> Result<MigrationOutcome, MigrationError> {
    let pool = connect(&settings.database).await.map_err(MigrationError::Connect)?;
    let migrator = load_migrator(&settings.migrations_dir).await?;
    let outcome = apply_pending(&pool, &migrator).await;
    pool.close().await;
    outcome
}

/// Connect with `settings`, then revert according to `scope`.
pub async fn migrate_down(settings: &Settings, scope: RevertScope) -> Result<MigrationOutcome, MigrationError> {
    let pool = connect(&settings.database).await.map_err(MigrationError::Connect)?;
    let migrator = load_migrator(&settings.migrations_dir).await?;
    let outcome = revert(&pool, &migrator, scope).await;
    pool.close().await;
    outcome
}

pub async fn apply_pending(pool: &PgPool, migrator: &Migrator) -> Result<MigrationOutcome, MigrationError> {
    let applied = applied_versions(pool).await?;
    let pending = pending_versions(migrator, &applied);
    if pending.is_empty() {
        return Ok(MigrationOutcome::NoChange);
    }
    tracing::info!(versions = ?pending, "applying migrations");
    migrator.run(pool).await?;
    Ok(MigrationOutcome::Changed(pending))
}

pub async fn revert(pool: &PgPool, migrator: &Migrator, scope: RevertScope) -> Result<MigrationOutcome, MigrationError> {
    let applied = applied_versions(pool).await?;
    let Some((target, reverted)) = revert_plan(&applied, scope) else {
        return Ok(MigrationOutcome::NoChange);
    };
    tracing::info!(versions = ?reverted, to_version = target, "reverting migrations");
    migrator.undo(pool, target).await?;
    Ok(MigrationOutcome::Changed(reverted))
}

/// Versions recorded as applied, ascending. Creates the bookkeeping table on first use.
pub async fn applied_versions(pool: &PgPool) -> Result<Vec<i64>, MigrationError> {
    let mut conn = pool.acquire().await.map_err(MigrationError::Connect)?;
    conn.ensure_migrations_table().await?;
    let mut versions: Vec<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();
    versions.sort_unstable();
    Ok(versions)
}

/// Up migrations not yet applied, in version order.
pub fn pending_versions(migrator: &Migrator, applied: &[i64]) -> Vec<i64> {
    let applied: HashSet<i64> = applied.iter().copied().collect();
    let mut pending: Vec<i64> = migrator
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .map(|m| m.version)
        .filter(|v| !applied.contains(v))
        .collect();
    pending.sort_unstable();
    pending
}

/// Target version for `Migrator::undo` and the versions it will revert (newest first).
/// `None` when nothing is applied. `applied` must be ascending.
pub fn revert_plan(applied: &[i64], scope: RevertScope) -> Option<(i64, Vec<i64>)> {
    let (&latest, rest) = applied.split_last()?;
    match scope {
        RevertScope::Latest => Some((rest.last().copied().unwrap_or(-1), vec![latest])),
        RevertScope::All => Some((-1, applied.iter().rev().copied().collect())),
    }
}
