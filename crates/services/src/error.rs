//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ParseIdError, QuizId, QuizValidationError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizService` and identifier parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("missing <id> parameter")]
    MissingIdentifier,
    #[error("the <id> parameter is not a number: {0}")]
    InvalidIdentifier(#[from] ParseIdError),
    #[error("there is no quiz with id {0}")]
    RecordNotFound(QuizId),
    #[error(transparent)]
    Validation(#[from] QuizValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Drawing from a session pool that has nothing left.
///
/// Callers check emptiness first; this never reaches the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("session pool is empty")]
pub struct EmptyPoolError;

/// Errors raised by a `Console` implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConsoleError {
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors that stop a play session or a single-quiz test.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayError {
    #[error("there is no quiz with id {0}")]
    RecordNotFound(QuizId),
    #[error(transparent)]
    Quiz(#[from] QuizServiceError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Quiz(#[from] QuizServiceError),
}
