//! Per-entity sequence generator backed by the `counters` table.
//!
//! # Responsibility
//! - Hand out the next integer identity for a named entity series.
//!
//! # Invariants
//! - The first allocation for an unseen entity returns 1.
//! - Each allocation increases the stored value by exactly 1; values are
//!   never handed out twice, even across connections or processes.
//! - Deleting records elsewhere never resets a counter.

use super::{ensure_table_ready, RepoResult};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Sequence series used for idea identities.
pub const IDEAS_SEQUENCE: &str = "ideas";

/// Allocator of monotonically increasing identities.
pub trait SequenceGenerator {
    /// Atomically increments the counter for `entity` and returns the new
    /// value, creating the counter at 0 first when absent.
    fn next(&self, entity: &str) -> RepoResult<i64>;
}

/// SQLite-backed sequence generator.
pub struct SqliteSequenceGenerator<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSequenceGenerator<'conn> {
    /// Creates a generator from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "counters", &["entity", "seq"])?;
        Ok(Self { conn })
    }

    /// Returns the last allocated value for `entity` without allocating.
    ///
    /// `None` means no value has ever been allocated for that series.
    pub fn current(&self, entity: &str) -> RepoResult<Option<i64>> {
        let seq = self
            .conn
            .query_row(
                "SELECT seq FROM counters WHERE entity = ?1;",
                [entity],
                |row| row.get(0),
            )
            .optional()?;
        Ok(seq)
    }
}

impl SequenceGenerator for SqliteSequenceGenerator<'_> {
    fn next(&self, entity: &str) -> RepoResult<i64> {
        // IMMEDIATE takes the write lock before the upsert reads the row, so
        // concurrent writers queue on the busy timeout instead of racing.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let seq: i64 = tx.query_row(
            "INSERT INTO counters (entity, seq) VALUES (?1, 1)
             ON CONFLICT(entity) DO UPDATE SET seq = seq + 1
             RETURNING seq;",
            [entity],
            |row| row.get(0),
        )?;
        tx.commit()?;

        debug!(
            "event=sequence_next module=repo status=ok entity={} seq={}",
            entity, seq
        );
        Ok(seq)
    }
}
