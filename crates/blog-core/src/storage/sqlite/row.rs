//! Raw row types for database queries, before parsing into domain types.

use rusqlite::Row;

use crate::error::{BlogError, Result};
use crate::storage::parse_timestamp;
use crate::storage::types::{PostDetail, StoredCredential, TagSearchHit, User};

/// Raw row data from the users table.
#[derive(Debug)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

impl UserRow {
    /// Expects columns `id, username, password_hash, created_at`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl TryFrom<UserRow> for StoredCredential {
    type Error = BlogError;

    fn try_from(row: UserRow) -> Result<Self> {
        let created_at = parse_timestamp(&row.created_at)?;
        Ok(StoredCredential {
            user: User {
                id: row.id,
                username: row.username,
                created_at,
            },
            password_hash: row.password_hash,
        })
    }
}

/// Raw row data for a post joined with its author.
#[derive(Debug)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
}

impl PostRow {
    /// Expects columns `id, title, content, author, created_at`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            author: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    /// Attach tag names and parse into the domain type.
    pub fn into_detail(self, tags: Vec<String>) -> Result<PostDetail> {
        let created_at = parse_timestamp(&self.created_at)?;
        Ok(PostDetail {
            id: self.id,
            title: self.title,
            content: self.content,
            author: self.author,
            created_at,
            tags,
        })
    }
}

/// Raw row data for a search-by-tag hit.
#[derive(Debug)]
pub struct HitRow {
    pub post_id: i64,
    pub title: String,
    pub author: String,
    pub created_at: String,
}

impl HitRow {
    /// Expects columns `post_id, title, author, created_at`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            post_id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl TryFrom<HitRow> for TagSearchHit {
    type Error = BlogError;

    fn try_from(row: HitRow) -> Result<Self> {
        Ok(TagSearchHit {
            post_id: row.post_id,
            title: row.title,
            author: row.author,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}
