//! CLI driver for the idea store.
//!
//! # Responsibility
//! - Map subcommands onto `IdeaService` operations against a SQLite file.
//! - Validate title/description lengths before input reaches the core.
//! - Print results as JSON envelopes on stdout.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ideabank_core::config::DEFAULT_DB_FILE_NAME;
use ideabank_core::{
    core_version, default_log_level, init_logging, open_db_with_config, ping, IdeaId, IdeaPatch,
    NewIdea, SqliteIdeaService, StoreConfig,
};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ideabank", version, about = "Store and manage ideas")]
struct Cli {
    /// SQLite database file. Overrides the `path` from `--config`.
    #[arg(long, env = "IDEABANK_DB", global = true)]
    db: Option<PathBuf>,

    /// JSON store configuration file.
    #[arg(long, env = "IDEABANK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "IDEABANK_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all ideas, ascending by id.
    List,
    /// Show one idea.
    Get { id: IdeaId },
    /// Create an idea; the id is assigned by the store.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Update the supplied fields of an idea.
    Update {
        id: IdeaId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete one idea.
    Delete { id: IdeaId },
    /// Delete every idea. Ids are not reused afterwards.
    Clear,
    /// Print core version and health probe without opening the store.
    Version,
}

fn main() -> Result<()> {
    let Cli {
        db,
        config,
        log_dir,
        log_level,
        command,
    } = Cli::parse();

    if let Some(log_dir) = log_dir.as_deref() {
        let level = log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let output = match command {
        Command::Version => version_info(),
        command => {
            let config = resolve_config(config, db)?;
            let conn = open_db_with_config(&config).with_context(|| {
                format!("failed to open database `{}`", config.path.display())
            })?;
            let service = SqliteIdeaService::try_from_conn(&conn)?;
            run(&service, command)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn resolve_config(config_path: Option<PathBuf>, db: Option<PathBuf>) -> Result<StoreConfig> {
    let mut config = match config_path {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::new(DEFAULT_DB_FILE_NAME),
    };
    if let Some(db) = db {
        config.path = db;
    }
    config.validate()?;
    Ok(config)
}

fn version_info() -> Value {
    json!({ "ping": ping(), "version": core_version() })
}

fn run(service: &SqliteIdeaService<'_>, command: Command) -> Result<Value> {
    let output = match command {
        Command::List => {
            let ideas = service.get_all()?;
            json!({ "message": "Listing all ideas", "ideas": ideas })
        }
        Command::Get { id } => {
            let idea = service.get_by_id(id)?;
            json!({ "message": format!("Found an idea with id {id}"), "idea": idea })
        }
        Command::Create { title, description } => {
            let fields = NewIdea::new(title, description);
            fields.validate()?;
            let idea = service.create(fields)?;
            json!({ "message": format!("Created an idea with id {}", idea.id), "idea": idea })
        }
        Command::Update {
            id,
            title,
            description,
        } => {
            let patch = IdeaPatch { title, description };
            patch.validate()?;
            let idea = service.update_by_id(id, &patch)?;
            json!({ "message": format!("Updated the idea with id {id}"), "idea": idea })
        }
        Command::Delete { id } => {
            service.delete_by_id(id)?;
            json!({ "message": format!("Deleted an idea with id {id}") })
        }
        Command::Clear => {
            let removed = service.delete_all()?;
            json!({ "message": "Deleted all ideas", "removed": removed })
        }
        Command::Version => version_info(),
    };
    Ok(output)
}
