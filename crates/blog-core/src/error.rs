//! Error types for blog core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and decides whether the session continues.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for blog operations.
pub type Result<T> = std::result::Result<T, BlogError>;

/// Core error type for blog operations.
#[derive(Debug, Error)]
pub enum BlogError {
    /// The store could not be opened or configured
    #[error("Cannot open database at {path}: {message}")]
    Connection { path: PathBuf, message: String },

    /// A user with this username already exists
    #[error("Username \"{0}\" is already taken")]
    DuplicateUsername(String),

    /// A post with this title already exists
    #[error("A post titled \"{0}\" already exists")]
    DuplicateTitle(String),

    /// Unknown username or wrong password
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Post is missing or belongs to another user. The two cases are
    /// deliberately reported the same way.
    #[error("Post {0} not found or you don't have permission to edit it")]
    NotFoundOrNotOwned(i64),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The export file could not be written
    #[error("Cannot write export to {path}: {message}")]
    ExportIo { path: PathBuf, message: String },

    /// Password hashing or hash parsing failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl BlogError {
    /// Whether this error reflects something the user did, as opposed to a
    /// fault in the store.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            BlogError::DuplicateUsername(_)
                | BlogError::DuplicateTitle(_)
                | BlogError::AuthenticationFailed
                | BlogError::NotFoundOrNotOwned(_)
                | BlogError::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_does_not_reveal_owner() {
        let err = BlogError::NotFoundOrNotOwned(7);
        let message = err.to_string();
        assert!(message.contains("Post 7"));
        assert!(message.contains("not found or"));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(BlogError::AuthenticationFailed.is_user_error());
        assert!(BlogError::DuplicateTitle("x".to_string()).is_user_error());
        assert!(!BlogError::Storage("disk".to_string()).is_user_error());
        let sqlite: BlogError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(!sqlite.is_user_error());
    }
}
