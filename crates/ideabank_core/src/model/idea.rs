//! Idea domain model.
//!
//! # Responsibility
//! - Define the persisted idea record and its create/update inputs.
//! - Provide boundary validation helpers for title/description lengths.
//!
//! # Invariants
//! - `id` is assigned by the sequence generator, never by clients.
//! - Store and service paths do not re-validate lengths; callers validate
//!   input before it reaches them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable numeric identity of an idea.
pub type IdeaId = i64;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MIN_CHARS: usize = 3;
pub const DESCRIPTION_MAX_CHARS: usize = 250;

/// Persisted idea record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
}

impl Idea {
    /// Builds a record from an allocated identity and create input.
    pub fn with_id(id: IdeaId, fields: NewIdea) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
        }
    }
}

/// Input for creating an idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
}

impl NewIdea {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Checks both fields against their length bounds.
    pub fn validate(&self) -> Result<(), IdeaValidationError> {
        validate_title(&self.title)?;
        validate_description(&self.description)
    }
}

/// Partial update input. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IdeaPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }

    /// Returns `true` when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Checks supplied fields against their length bounds.
    pub fn validate(&self) -> Result<(), IdeaValidationError> {
        if let Some(title) = self.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(description) = self.description.as_deref() {
            validate_description(description)?;
        }
        Ok(())
    }
}

/// Length-bound violations, counted in Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdeaValidationError {
    #[error("title must be 3-100 characters, got {0}")]
    TitleLength(usize),
    #[error("description must be 3-250 characters, got {0}")]
    DescriptionLength(usize),
}

fn validate_title(title: &str) -> Result<(), IdeaValidationError> {
    let len = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        return Err(IdeaValidationError::TitleLength(len));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), IdeaValidationError> {
    let len = description.chars().count();
    if !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&len) {
        return Err(IdeaValidationError::DescriptionLength(len));
    }
    Ok(())
}
