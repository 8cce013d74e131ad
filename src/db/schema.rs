//! Schema versioning via SQLite's `user_version` pragma.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Ordered schema steps; step `n` brings the database to version `n + 1`.
const MIGRATIONS: &[&str] = &[include_str!("migrations/001_initial.sql")];

fn schema_version(conn: &Connection) -> Result<usize> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(usize::try_from(version).unwrap_or(0))
}

/// Apply every step newer than the stored version.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current = schema_version(conn)?;

    for (step, sql) in MIGRATIONS.iter().enumerate().skip(current) {
        let version = step + 1;
        tracing::info!("Upgrading database schema to version {}", version);
        conn.execute_batch(&format!(
            "BEGIN; {} PRAGMA user_version = {}; COMMIT;",
            sql, version
        ))
        .with_context(|| format!("Failed to upgrade schema to version {}", version))?;
    }

    Ok(())
}
