//! Idea use-case service.
//!
//! # Responsibility
//! - Assign identities through the sequence generator on create.
//! - Delegate every other operation to the idea repository.
//!
//! # Invariants
//! - Holds no state beyond its two collaborators.
//! - Repository errors pass through unchanged; no new failure modes.
//! - A sequence value consumed by a create whose insert fails is never reused.

use crate::model::idea::{Idea, IdeaId, IdeaPatch, NewIdea};
use crate::repo::idea_repo::{IdeaRepository, SqliteIdeaRepository};
use crate::repo::sequence_repo::{SequenceGenerator, SqliteSequenceGenerator, IDEAS_SEQUENCE};
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use rusqlite::Connection;

/// Service wired to SQLite collaborators sharing one connection.
pub type SqliteIdeaService<'conn> =
    IdeaService<SqliteSequenceGenerator<'conn>, SqliteIdeaRepository<'conn>>;

/// Service facade composing a sequence generator and an idea repository.
pub struct IdeaService<S: SequenceGenerator, R: IdeaRepository> {
    sequence: S,
    repo: R,
}

impl<S: SequenceGenerator, R: IdeaRepository> IdeaService<S, R> {
    pub fn new(sequence: S, repo: R) -> Self {
        Self { sequence, repo }
    }

    /// Lists all ideas, ascending by id.
    pub fn get_all(&self) -> RepoResult<Vec<Idea>> {
        self.repo.list_ideas()
    }

    pub fn get_by_id(&self, id: IdeaId) -> RepoResult<Idea> {
        self.repo.get_idea(id).inspect_err(|err| log_failure("get", id, err))
    }

    /// Allocates the next `ideas` identity and persists the new record.
    pub fn create(&self, fields: NewIdea) -> RepoResult<Idea> {
        let id = self.sequence.next(IDEAS_SEQUENCE)?;
        let idea = Idea::with_id(id, fields);
        self.repo
            .insert_idea(&idea)
            .inspect_err(|err| log_failure("create", id, err))?;

        info!("event=idea_create module=service status=ok id={}", id);
        Ok(idea)
    }

    /// Applies a partial update and returns the stored result.
    pub fn update_by_id(&self, id: IdeaId, patch: &IdeaPatch) -> RepoResult<Idea> {
        let idea = self
            .repo
            .update_idea(id, patch)
            .inspect_err(|err| log_failure("update", id, err))?;

        info!(
            "event=idea_update module=service status=ok id={} title_set={} description_set={}",
            id,
            patch.title.is_some(),
            patch.description.is_some()
        );
        Ok(idea)
    }

    /// Removes every idea. Identity allocation continues where it left off.
    pub fn delete_all(&self) -> RepoResult<usize> {
        let removed = self.repo.delete_all_ideas()?;
        info!(
            "event=idea_delete_all module=service status=ok removed={}",
            removed
        );
        Ok(removed)
    }

    pub fn delete_by_id(&self, id: IdeaId) -> RepoResult<()> {
        self.repo
            .delete_idea(id)
            .inspect_err(|err| log_failure("delete", id, err))?;

        info!("event=idea_delete module=service status=ok id={}", id);
        Ok(())
    }
}

impl<'conn> SqliteIdeaService<'conn> {
    /// Builds the service over a migrated connection.
    pub fn try_from_conn(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteSequenceGenerator::try_new(conn)?,
            SqliteIdeaRepository::try_new(conn)?,
        ))
    }
}

fn log_failure(op: &str, id: IdeaId, err: &RepoError) {
    match err {
        RepoError::NotFound(_) => {
            warn!(
                "event=idea_{} module=service status=error error_code=not_found id={}",
                op, id
            );
        }
        RepoError::DuplicateIdentity(_) => {
            error!(
                "event=idea_{} module=service status=error error_code=duplicate_identity id={}",
                op,
                id
            );
        }
        RepoError::StorageUnavailable(db_err) => {
            error!(
                "event=idea_{} module=service status=error error_code=storage_unavailable id={} error={}",
                op,
                id,
                db_err
            );
        }
    }
}
