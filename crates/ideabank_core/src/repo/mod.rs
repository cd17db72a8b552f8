//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateIdentity`)
//!   in addition to storage failures.
//! - Every storage failure is reported as `StorageUnavailable`; nothing here
//!   retries.

use crate::db::DbError;
use crate::model::idea::IdeaId;
use rusqlite::Connection;
use thiserror::Error;

pub mod idea_repo;
pub mod sequence_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Closed set of failures surfaced by the store and service layers.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Operation addressed an id with no stored record.
    #[error("idea not found: {0}")]
    NotFound(IdeaId),
    /// Insert collided with an existing id. Indicates a sequence bug.
    #[error("idea identity already exists: {0}")]
    DuplicateIdentity(IdeaId),
    /// Underlying persistence failed or is not usable.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] DbError),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(DbError::Sqlite(value))
    }
}

/// Fails with `StorageUnavailable` unless `table` exists with every column in `columns`.
pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(DbError::MissingRequiredTable(table).into());
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(DbError::MissingRequiredColumn { table, column }.into());
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
