//! SQLite storage backend.
//!
//! One `rusqlite::Connection` guarded by a mutex. Every multi-statement write
//! runs in a transaction; returning early drops the transaction, which rolls
//! it back.

mod row;
mod schema;
mod tags;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Transaction};
use tracing::{debug, info};

use crate::auth::Session;
use crate::error::{BlogError, Result};
use crate::storage::format_timestamp;
use crate::storage::traits::BlogStore;
use crate::storage::types::{
    page_count, ExportDocument, ExportedPost, NewPost, PostDetail, PostPage, PostSummary,
    PostUpdate, StoredCredential, TagSearchHit, User,
};

use row::{HitRow, PostRow, UserRow};

/// Maximum characters in a post title.
const MAX_TITLE_CHARS: usize = 255;

/// SQLite-backed blog store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| BlogError::Connection {
            path: ":memory:".into(),
            message: e.to_string(),
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| BlogError::Storage("SQLite connection poisoned".to_string()))
    }

    #[cfg(test)]
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> T {
        let conn = self.lock_conn().unwrap();
        f(&conn).unwrap()
    }
}

/// Whether `title` belongs to a post other than `except`.
fn title_taken(tx: &Transaction<'_>, title: &str, except: Option<i64>) -> Result<bool> {
    let owner: Option<i64> = tx
        .query_row("SELECT id FROM posts WHERE title = ?", [title], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(matches!(owner, Some(id) if Some(id) != except))
}

fn validate_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BlogError::InvalidInput("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(BlogError::InvalidInput(format!(
            "Title too long (max {} characters)",
            MAX_TITLE_CHARS
        )));
    }
    Ok(title)
}

impl BlogStore for SqliteStore {
    fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| BlogError::Connection {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let store = Self::from_connection(conn).map_err(|e| BlogError::Connection {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "opened database");
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        schema::ensure(&conn)
    }

    fn reset_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        schema::reset(&conn)
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        schema::check_integrity(&conn)
    }

    fn insert_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let exists: Option<i64> = tx
            .query_row(
                "SELECT id FROM users WHERE username = ?",
                [username],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(BlogError::DuplicateUsername(username.to_string()));
        }

        let created_at = Utc::now();
        tx.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
            (username, password_hash, format_timestamp(&created_at)),
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(User {
            id,
            username: username.to_string(),
            created_at,
        })
    }

    fn find_credential(&self, username: &str) -> Result<Option<StoredCredential>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
                [username],
                UserRow::from_row,
            )
            .optional()?;
        row.map(StoredCredential::try_from).transpose()
    }

    fn create_post(&self, session: &Session, post: &NewPost) -> Result<i64> {
        let title = validate_title(&post.title)?;
        if post.content.trim().is_empty() {
            return Err(BlogError::InvalidInput(
                "Content cannot be empty".to_string(),
            ));
        }

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        if title_taken(&tx, title, None)? {
            return Err(BlogError::DuplicateTitle(title.to_string()));
        }

        tx.execute(
            "INSERT INTO posts (title, content, user_id, created_at) VALUES (?, ?, ?, ?)",
            (
                title,
                &post.content,
                session.user_id(),
                format_timestamp(&Utc::now()),
            ),
        )?;
        let post_id = tx.last_insert_rowid();

        let applied = tags::apply_tags(&tx, post_id, &post.tags)?;

        tx.commit()?;

        info!(post_id, user_id = session.user_id(), tags = applied.len(), "created post");
        Ok(post_id)
    }

    fn update_post(&self, session: &Session, post_id: i64, update: &PostUpdate) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let current: Option<(String, String)> = tx
            .query_row(
                "SELECT title, content FROM posts WHERE id = ? AND user_id = ?",
                (post_id, session.user_id()),
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (current_title, current_content) =
            current.ok_or(BlogError::NotFoundOrNotOwned(post_id))?;

        let title = match update.title.as_deref() {
            Some(value) if !value.trim().is_empty() => validate_title(value)?.to_string(),
            _ => current_title.clone(),
        };
        if title != current_title && title_taken(&tx, &title, Some(post_id))? {
            return Err(BlogError::DuplicateTitle(title));
        }
        let content = match update.content.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => current_content,
        };

        tx.execute(
            "UPDATE posts SET title = ?, content = ? WHERE id = ?",
            (&title, &content, post_id),
        )?;

        if let Some(raw) = update.tags.as_deref().filter(|raw| !raw.trim().is_empty()) {
            let removed = tags::clear_tags(&tx, post_id)?;
            let applied = tags::apply_tags(&tx, post_id, raw)?;
            debug!(post_id, removed, applied = applied.len(), "replaced tags");
        }

        tx.commit()?;

        info!(post_id, user_id = session.user_id(), "updated post");
        Ok(())
    }

    fn list_posts(&self, page: u32, page_size: u32) -> Result<PostPage> {
        if page == 0 {
            return Err(BlogError::InvalidInput("Page numbers start at 1".to_string()));
        }
        if page_size == 0 {
            return Err(BlogError::InvalidInput(
                "Page size must be at least 1".to_string(),
            ));
        }

        let conn = self.lock_conn()?;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        let total_posts = u64::try_from(total).unwrap_or(0);

        let offset = i64::from(page - 1) * i64::from(page_size);
        let mut stmt = conn.prepare(
            "SELECT id, title FROM posts ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )?;
        let items = stmt
            .query_map((i64::from(page_size), offset), |row| {
                Ok(PostSummary {
                    id: row.get(0)?,
                    title: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(PostPage {
            items,
            page,
            page_size,
            total_posts,
            total_pages: page_count(total_posts, page_size),
        })
    }

    fn get_post(&self, post_id: i64) -> Result<Option<PostDetail>> {
        let conn = self.lock_conn()?;

        let row = conn
            .query_row(
                r#"
                SELECT p.id, p.title, p.content, u.username, p.created_at
                FROM posts p
                JOIN users u ON u.id = p.user_id
                WHERE p.id = ?
                "#,
                [post_id],
                PostRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => {
                let tags = tags::tags_for_post(&conn, post_id)?;
                Ok(Some(row.into_detail(tags)?))
            }
            None => Ok(None),
        }
    }

    fn search_by_tag(&self, tag: &str) -> Result<Vec<TagSearchHit>> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT p.id, p.title, u.username, p.created_at
            FROM posts p
            JOIN post_tags pt ON pt.post_id = p.id
            JOIN tags t ON t.id = pt.tag_id
            JOIN users u ON u.id = p.user_id
            WHERE t.name = ?
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )?;
        let rows = stmt.query_map([tag], HitRow::from_row)?;

        let mut hits = Vec::new();
        for row in rows {
            hits.push(row?.try_into()?);
        }
        Ok(hits)
    }

    fn export_all(&self) -> Result<ExportDocument> {
        let conn = self.lock_conn()?;

        let mut tag_stmt = conn.prepare(
            r#"
            SELECT pt.post_id, t.name
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            ORDER BY pt.post_id, pt.rowid
            "#,
        )?;
        let mut tags_by_post: HashMap<i64, Vec<String>> = HashMap::new();
        let tag_rows = tag_stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        for tag_row in tag_rows {
            let (post_id, name) = tag_row?;
            tags_by_post.entry(post_id).or_default().push(name);
        }

        let mut post_stmt = conn.prepare(
            r#"
            SELECT p.id, p.title, p.content, u.username, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )?;
        let rows = post_stmt.query_map([], PostRow::from_row)?;

        let mut posts = Vec::new();
        for row in rows {
            let row = row?;
            let tags = tags_by_post.remove(&row.id).unwrap_or_default();
            posts.push(ExportedPost::from(row.into_detail(tags)?));
        }

        debug!(count = posts.len(), "shaped export document");
        Ok(ExportDocument { posts })
    }

    fn prune_unused_tags(&self) -> Result<usize> {
        let conn = self.lock_conn()?;
        let removed = conn.execute(
            "DELETE FROM tags WHERE id NOT IN (SELECT tag_id FROM post_tags)",
            [],
        )?;
        info!(removed, "pruned unused tags");
        Ok(removed)
    }
}
