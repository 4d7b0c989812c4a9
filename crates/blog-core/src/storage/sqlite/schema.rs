//! Table definitions and the ensure/reset lifecycle.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::{info, warn};

use crate::auth::hash_password;
use crate::error::{BlogError, Result};
use crate::storage::format_timestamp;

/// Login name of the account seeded into every fresh database.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Initial password of the seeded admin account.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Parents before children.
const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE CHECK (length(username) BETWEEN 1 AND 50),
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL UNIQUE CHECK (length(title) BETWEEN 1 AND 255),
        content TEXT NOT NULL,
        user_id INTEGER NOT NULL,
        created_at TEXT NOT NULL,

        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS posts_created_at ON posts (created_at);

    -- Tag names are unique regardless of case; the first spelling wins.
    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL COLLATE NOCASE UNIQUE CHECK (length(name) BETWEEN 1 AND 50)
    );

    -- Post-tag links. The implicit rowid records attach order.
    CREATE TABLE IF NOT EXISTS post_tags (
        post_id INTEGER NOT NULL,
        tag_id INTEGER NOT NULL,

        PRIMARY KEY (post_id, tag_id),
        FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
        FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS post_tags_tag_id ON post_tags (tag_id);
"#;

/// Children before parents.
const DROP_TABLES: &str = r#"
    DROP TABLE IF EXISTS post_tags;
    DROP TABLE IF EXISTS posts;
    DROP TABLE IF EXISTS tags;
    DROP TABLE IF EXISTS users;
"#;

/// Create missing tables and seed the admin account if it is absent.
pub fn ensure(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)?;
    seed_admin(conn)?;
    Ok(())
}

/// Drop every table and recreate the schema.
pub fn reset(conn: &Connection) -> Result<()> {
    warn!("dropping all blog tables");
    // Must run outside a transaction; SQLite ignores this pragma inside one.
    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    let dropped = conn.execute_batch(DROP_TABLES);
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    dropped?;
    ensure(conn)
}

/// Run SQLite's own consistency checks.
pub fn check_integrity(conn: &Connection) -> Result<()> {
    let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    if status != "ok" {
        return Err(BlogError::Storage(format!(
            "Integrity check failed: {}",
            status
        )));
    }

    let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
    let violations = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if !violations.is_empty() {
        return Err(BlogError::Storage(format!(
            "Foreign key violations in: {}",
            violations.join(", ")
        )));
    }

    Ok(())
}

fn seed_admin(conn: &Connection) -> Result<()> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT id FROM users WHERE username = ?",
            [DEFAULT_ADMIN_USERNAME],
            |row| row.get(0),
        )
        .optional()?;
    if exists.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        (
            DEFAULT_ADMIN_USERNAME,
            password_hash,
            format_timestamp(&Utc::now()),
        ),
    )?;
    if inserted > 0 {
        info!(username = DEFAULT_ADMIN_USERNAME, "seeded default admin account");
    }
    Ok(())
}
