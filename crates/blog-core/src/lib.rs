//! # Blog Core
//!
//! Core library for `blog` - a single-session command-line blog manager
//! backed by SQLite.
//!
//! This crate provides the domain types, the storage trait and its SQLite
//! implementation, independent of the CLI.
//!
//! ## Architecture
//!
//! - **storage**: `BlogStore` trait, domain types, SQLite backend (schema,
//!   posts, tags, search, export shaping)
//! - **auth**: password hashing, registration, login and the session slot
//! - **tags**: tag input normalization
//! - **export**: JSON export writer

pub mod auth;
pub mod error;
pub mod export;
pub mod fs;
pub mod storage;
pub mod tags;

pub use auth::{Session, SessionSlot};
pub use error::{BlogError, Result};
pub use storage::{BlogStore, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
