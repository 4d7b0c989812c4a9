//! Writing the export document to disk.
//!
//! Shaping the document is the store's job (`BlogStore::export_all`); this
//! module only serializes it.

use std::path::Path;

use tracing::info;

use crate::error::{BlogError, Result};
use crate::storage::ExportDocument;

/// Serialize the document as pretty-printed JSON (two-space indent).
pub fn render_export(document: &ExportDocument) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(document)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write the document to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `BlogError::ExportIo` if the file cannot be written.
pub fn write_export(path: &Path, document: &ExportDocument) -> Result<()> {
    let rendered = render_export(document)?;
    crate::fs::write_atomic(path, rendered.as_bytes()).map_err(|e| BlogError::ExportIo {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), posts = document.posts.len(), "wrote export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ExportedPost;
    use tempfile::tempdir;

    fn document() -> ExportDocument {
        ExportDocument {
            posts: vec![
                ExportedPost {
                    id: 2,
                    title: "Second".to_string(),
                    content: "body".to_string(),
                    author: "alice".to_string(),
                    created_at: "2024-05-01T10:00:00.000000Z".to_string(),
                    tags: Vec::new(),
                },
                ExportedPost {
                    id: 1,
                    title: "First".to_string(),
                    content: "body".to_string(),
                    author: "bob".to_string(),
                    created_at: "2024-04-01T10:00:00.000000Z".to_string(),
                    tags: vec!["a".to_string(), "b".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_render_uses_two_space_indent_and_posts_key() {
        let rendered = render_export(&document()).unwrap();
        assert!(rendered.starts_with("{\n  \"posts\": [\n    {\n      \"id\": 2,"));
        assert!(rendered.contains("\"tags\": []"));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_write_export_round_trips_through_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");

        write_export(&path, &document()).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let posts = parsed["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1]["tags"], serde_json::json!(["a", "b"]));
        assert_eq!(posts[0]["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_write_export_to_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.json");

        let err = write_export(&path, &document()).unwrap_err();
        assert!(matches!(err, BlogError::ExportIo { .. }));
    }
}
