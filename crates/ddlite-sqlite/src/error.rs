//! Error types for the SQLite driver.

use ddlite_core::BuildError;

/// Errors that can occur while talking to the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Error reported by SQLite or the connection pool.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A statement could not be rendered.
    #[error("Failed to build statement: {0}")]
    Build(#[from] BuildError),

    /// A result column could not be mapped to a value.
    #[error("Failed to decode column '{column}': {message}")]
    Decode {
        /// Column name.
        column: String,
        /// Error message.
        message: String,
    },
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
