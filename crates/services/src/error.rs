//! Shared error types for the services crate.

use thiserror::Error;

use planner_core::model::TaskError;
use storage::records::CodecError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `TaskStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaskStoreError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TaskStoreError {
    /// Message suitable for a blocking alert in the UI.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            TaskStoreError::Task(TaskError::EmptyTitle) => "Please enter a title.",
            TaskStoreError::Task(TaskError::MissingDueDate) => "Please fill in title and date.",
            TaskStoreError::Task(_) => "That task is not valid.",
            TaskStoreError::Codec(_) | TaskStoreError::Storage(_) => {
                "Your changes could not be saved."
            }
        }
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Inline text shown under the sign-in form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password.",
            AuthError::Codec(_) | AuthError::Storage(_) => "Sign-in is unavailable right now.",
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}
