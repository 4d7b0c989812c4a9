//! Materializing tag rows and post-tag links inside a write transaction.

use rusqlite::Transaction;
use tracing::debug;

use crate::error::{BlogError, Result};
use crate::tags::{parse_tag_list, MAX_TAG_CHARS};

/// Attach every tag named in `raw` to `post_id`.
///
/// Tags are created on first use. Existing links are left alone, so applying
/// the same input twice is a no-op. Must run inside the transaction that
/// wrote the post; any error here is meant to abort that transaction.
///
/// # Returns
///
/// Returns the normalized names that were applied, in order.
pub fn apply_tags(tx: &Transaction<'_>, post_id: i64, raw: &str) -> Result<Vec<String>> {
    let names = parse_tag_list(raw);

    for name in &names {
        if name.chars().count() > MAX_TAG_CHARS {
            return Err(BlogError::InvalidInput(format!(
                "Tag \"{}\" is too long (max {} characters)",
                name, MAX_TAG_CHARS
            )));
        }

        tx.execute(
            "INSERT INTO tags (name) VALUES (?) ON CONFLICT DO NOTHING",
            [name],
        )?;
        let tag_id: i64 =
            tx.query_row("SELECT id FROM tags WHERE name = ?", [name], |row| row.get(0))?;
        tx.execute(
            "INSERT INTO post_tags (post_id, tag_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
            (post_id, tag_id),
        )?;
    }

    debug!(post_id, count = names.len(), "applied tags");
    Ok(names)
}

/// Remove every tag link of a post. Tags themselves are kept.
pub fn clear_tags(tx: &Transaction<'_>, post_id: i64) -> Result<usize> {
    Ok(tx.execute("DELETE FROM post_tags WHERE post_id = ?", [post_id])?)
}

/// Tag names of a post in attach order.
pub fn tags_for_post(conn: &rusqlite::Connection, post_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT t.name
        FROM post_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.post_id = ?
        ORDER BY pt.rowid
        "#,
    )?;
    let names = stmt
        .query_map([post_id], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names)
}
