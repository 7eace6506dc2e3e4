use std::fmt;

use thiserror::Error;

use crate::user::errors::UserError;

/// Error for EntryId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntryIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Skills parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkillsError {
    #[error("No skills given")]
    Empty,
}

/// Which nested history list an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Experience,
    Education,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Experience => f.write_str("Experience"),
            EntryKind::Education => f.write_str("Education"),
        }
    }
}

/// Top-level error for all profile-related operations
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("Profile not found for user: {0}")]
    NotFound(String),

    #[error("{kind} not found: {id}")]
    EntryNotFound { kind: EntryKind, id: String },

    #[error("Account error: {0}")]
    Account(#[from] UserError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
