//! Unified error type for the rescue store.
//!
//! Validation problems are collected per field before any write happens.
//! Integrity violations and store-access failures are surfaced to the caller
//! as-is; nothing here retries.

use crate::core::validation::ValidationErrors;
use sea_orm::DbErr;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the domain model and the persistence layer.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more fields failed validation; every violation is listed.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A hard delete was blocked because dependent rows still reference the target.
    #[error("Cannot delete {entity} {id}: still referenced by {dependents} {relation} row(s)")]
    IntegrityViolation {
        /// Table of the row whose deletion was attempted
        entity: String,
        /// Identifier of that row
        id: i64,
        /// Table holding the restricting references
        relation: String,
        /// Number of referencing rows
        dependents: u64,
    },

    /// The requested row does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Table that was searched
        entity: String,
        /// Identifier that was looked up
        id: i64,
    },

    /// No store file exists at the given path.
    #[error("Store not found at {}", path.display())]
    StoreNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Store access failed (missing, locked, corrupt, or a rejected statement).
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Filesystem failure while preparing the store location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl Error {
    /// Returns the field-level violations if this is a validation error.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
