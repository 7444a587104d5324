//! Quiz schema upgrades.
//!
//! Migration `n` is `MIGRATIONS[n - 1]`; the applied count is stored in
//! `PRAGMA user_version`. Entries are append-only.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const MIGRATIONS: &[&str] = &[include_str!("0001_quizzes.sql")];

/// Schema version produced by applying every known migration.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Brings the quiz schema up to `latest_version()` in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let pending = (current + 1..=latest).zip(&MIGRATIONS[current as usize..]);
    let tx = conn.transaction()?;
    for (version, sql) in pending {
        tx.execute_batch(sql)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration { version, source })?;
    }
    tx.commit()?;

    if current < latest {
        info!("event=db_migrate module=db status=ok from_version={current} to_version={latest}");
    }
    Ok(())
}
