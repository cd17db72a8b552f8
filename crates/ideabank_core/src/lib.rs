//! Core persistence for the idea store.
//! This crate owns identity allocation and every record invariant.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, JournalMode, StoreConfig};
pub use db::{open_db, open_db_in_memory, open_db_with_config, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::idea::{Idea, IdeaId, IdeaPatch, IdeaValidationError, NewIdea};
pub use repo::idea_repo::{IdeaRepository, SqliteIdeaRepository};
pub use repo::sequence_repo::{SequenceGenerator, SqliteSequenceGenerator, IDEAS_SEQUENCE};
pub use repo::{RepoError, RepoResult};
pub use service::idea_service::{IdeaService, SqliteIdeaService};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
