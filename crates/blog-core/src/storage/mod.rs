//! Storage layer: domain types, the `BlogStore` trait and the SQLite backend.

mod sqlite;
pub mod traits;
pub mod types;

use chrono::{DateTime, SecondsFormat, Utc};

pub use sqlite::SqliteStore;
pub use traits::BlogStore;
pub use types::{
    page_count, ExportDocument, ExportedPost, NewPost, PostDetail, PostPage, PostSummary,
    PostUpdate, StoredCredential, TagSearchHit, User,
};

use crate::error::{BlogError, Result};

/// Render a timestamp the way it is stored: RFC 3339, UTC, fixed microsecond
/// precision so that string order matches time order.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| BlogError::Storage(format!("Invalid timestamp {:?}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let a = parse_timestamp("2024-01-01T00:00:01Z").unwrap();
        let b = parse_timestamp("2024-01-01T00:00:01.5Z").unwrap();
        let fa = format_timestamp(&a);
        let fb = format_timestamp(&b);
        assert_eq!(fa, "2024-01-01T00:00:01.000000Z");
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
        assert_eq!(parse_timestamp(&fb).unwrap(), b);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(BlogError::Storage(_))
        ));
    }
}
