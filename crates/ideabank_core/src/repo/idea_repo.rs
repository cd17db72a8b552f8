//! Idea repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD APIs over the `ideas` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `list_ideas` is ordered by ascending `id`.
//! - Partial updates overwrite supplied fields verbatim; no length checks run here.
//! - `delete_all_ideas` never touches the `counters` table.

use super::{ensure_table_ready, RepoError, RepoResult};
use crate::model::idea::{Idea, IdeaId, IdeaPatch};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const IDEA_SELECT_SQL: &str = "SELECT id, title, description FROM ideas";

/// Repository interface for idea records.
pub trait IdeaRepository {
    /// Persists a new record. Fails with `DuplicateIdentity` if the id exists.
    fn insert_idea(&self, idea: &Idea) -> RepoResult<()>;
    /// Returns every record, ascending by id.
    fn list_ideas(&self) -> RepoResult<Vec<Idea>>;
    fn get_idea(&self, id: IdeaId) -> RepoResult<Idea>;
    /// Applies supplied fields and returns the post-update record.
    fn update_idea(&self, id: IdeaId, patch: &IdeaPatch) -> RepoResult<Idea>;
    fn delete_idea(&self, id: IdeaId) -> RepoResult<()>;
    /// Removes every record and returns how many were removed.
    fn delete_all_ideas(&self) -> RepoResult<usize>;
}

/// SQLite-backed idea repository.
pub struct SqliteIdeaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIdeaRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "ideas", &["id", "title", "description"])?;
        Ok(Self { conn })
    }
}

impl IdeaRepository for SqliteIdeaRepository<'_> {
    fn insert_idea(&self, idea: &Idea) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO ideas (id, title, description) VALUES (?1, ?2, ?3);",
            params![idea.id, idea.title.as_str(), idea.description.as_str()],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::DuplicateIdentity(idea.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_ideas(&self) -> RepoResult<Vec<Idea>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{IDEA_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut ideas = Vec::new();

        while let Some(row) = rows.next()? {
            ideas.push(parse_idea_row(row)?);
        }

        Ok(ideas)
    }

    fn get_idea(&self, id: IdeaId) -> RepoResult<Idea> {
        self.conn
            .query_row(
                &format!("{IDEA_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_idea_row,
            )
            .optional()?
            .ok_or(RepoError::NotFound(id))
    }

    fn update_idea(&self, id: IdeaId, patch: &IdeaPatch) -> RepoResult<Idea> {
        self.conn
            .query_row(
                "UPDATE ideas
                 SET
                    title = COALESCE(?2, title),
                    description = COALESCE(?3, description)
                 WHERE id = ?1
                 RETURNING id, title, description;",
                params![id, patch.title.as_deref(), patch.description.as_deref()],
                parse_idea_row,
            )
            .optional()?
            .ok_or(RepoError::NotFound(id))
    }

    fn delete_idea(&self, id: IdeaId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM ideas WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_all_ideas(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM ideas;", [])?;
        Ok(removed)
    }
}

fn parse_idea_row(row: &Row<'_>) -> rusqlite::Result<Idea> {
    Ok(Idea {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
    })
}
