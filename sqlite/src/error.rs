//! Error types for SQLite catalog operations.
//!
//! Provides a unified error type covering database access, migration,
//! record validation, and the two business-rule failures (duplicate id on
//! insert, missing id on update/delete).

use thiserror::Error;

/// Errors that can occur during SQLite catalog operations.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration lifecycle operation failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Table prefix contains invalid characters.
    #[error("invalid prefix '{0}': must contain only alphanumeric characters and underscores")]
    InvalidPrefix(String),

    /// Attempted insert with an id that already exists.
    #[error("a book with id {0} already exists")]
    DuplicateId(i64),

    /// Requested record does not exist.
    #[error("no book with id {0} exists")]
    BookNotFound(i64),

    /// Record violates a catalog invariant.
    #[error("invalid book: {0}")]
    InvalidBook(#[from] bookstore_core::ValidationError),
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;

/// Whether a rusqlite error is a constraint violation (primary key or CHECK).
pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::ConstraintViolation)
    )
}
