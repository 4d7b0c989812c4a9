//! Storage engine trait definition.
//!
//! The `BlogStore` trait is the seam between the blog's business rules and
//! the relational store. The session loop and the auth layer only ever see
//! this trait; `SqliteStore` is the one implementation.

use std::path::Path;

use super::types::{
    ExportDocument, NewPost, PostDetail, PostPage, PostUpdate, StoredCredential, TagSearchHit,
    User,
};
use crate::auth::Session;
use crate::error::Result;

/// Storage engine interface for the blog.
///
/// All implementations must ensure:
/// - Usernames, post titles and tag names stay unique
/// - A post and its tag links are written as one all-or-nothing unit
/// - Deleting a post removes its tag links
pub trait BlogStore: Send + Sync {
    /// Open (or create) a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Connection` if the database cannot be opened.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    // --- Schema operations ---

    /// Create any missing tables and seed the default admin user.
    ///
    /// Never drops data; safe to run on every start.
    fn ensure_schema(&self) -> Result<()>;

    /// Drop all tables and recreate them. Every user, post and tag is lost.
    fn reset_schema(&self) -> Result<()>;

    /// Check database integrity.
    ///
    /// Verifies:
    /// - SQLite page integrity
    /// - Foreign key relationships
    fn check_integrity(&self) -> Result<()>;

    // --- User operations ---

    /// Insert a new user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::DuplicateUsername` if the username is taken.
    fn insert_user(&self, username: &str, password_hash: &str) -> Result<User>;

    /// Look up a user and the stored password hash by exact username.
    fn find_credential(&self, username: &str) -> Result<Option<StoredCredential>>;

    // --- Post operations ---

    /// Create a post owned by the session user, together with its tags.
    ///
    /// # Returns
    ///
    /// Returns the id of the new post.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::DuplicateTitle` if the title is taken. On any error
    /// neither the post nor any of its tags are stored.
    fn create_post(&self, session: &Session, post: &NewPost) -> Result<i64>;

    /// Update a post owned by the session user.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::NotFoundOrNotOwned` if the post does not exist or
    /// belongs to someone else.
    fn update_post(&self, session: &Session, post_id: i64, update: &PostUpdate) -> Result<()>;

    /// List post titles one page at a time, newest first.
    ///
    /// `page` is 1-indexed.
    fn list_posts(&self, page: u32, page_size: u32) -> Result<PostPage>;

    /// Get a post with its author and tags.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(post))` if found, `Ok(None)` if not found.
    fn get_post(&self, post_id: i64) -> Result<Option<PostDetail>>;

    // --- Query and export operations ---

    /// Find posts carrying a tag, newest first. Unknown tags yield an empty list.
    fn search_by_tag(&self, tag: &str) -> Result<Vec<TagSearchHit>>;

    /// Shape every post into the export document, newest first.
    fn export_all(&self) -> Result<ExportDocument>;

    /// Delete tags that no post references.
    ///
    /// # Returns
    ///
    /// Returns the number of tags removed.
    fn prune_unused_tags(&self) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        fn _accepts_store<T: BlogStore>(_store: T) {}
        fn _accepts_dyn(_store: &dyn BlogStore) {}
    }
}
