//! Core data types for the storage layer.
//!
//! Rows coming out of SQLite are mapped into these types at the storage
//! boundary; nothing above the store touches raw column values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Surrogate identifier
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// When this user registered
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password hash (PHC string).
///
/// Only the auth layer should look at `password_hash`.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub user: User,
    pub password_hash: String,
}

/// Builder for creating new posts.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Unique title
    pub title: String,

    /// Post body
    pub content: String,

    /// Raw comma-separated tag input
    pub tags: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: String::new(),
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }
}

/// Changes to apply to an existing post.
///
/// `None` means "keep the current value". For tags, `Some` replaces the whole
/// tag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}

impl PostUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an update from raw prompt answers, where blank input keeps the
    /// current value instead of clearing it.
    pub fn from_input(title: &str, content: &str, tags: &str) -> Self {
        Self {
            title: non_blank(title),
            content: non_blank(content),
            tags: non_blank(tags),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// True when applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A post as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
}

/// One page of the post listing.
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    /// Posts on this page, newest first
    pub items: Vec<PostSummary>,

    /// 1-indexed page number that was requested
    pub page: u32,

    /// Requested page size
    pub page_size: u32,

    /// Number of posts in the store
    pub total_posts: u64,

    /// ceil(total_posts / page_size); zero when there are no posts
    pub total_pages: u32,
}

impl PostPage {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed to show `total` items at `page_size` per page.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let size = u64::from(page_size);
    u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
}

/// A post joined with its author and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,

    /// Tag names in the order they were attached
    pub tags: Vec<String>,
}

/// A search-by-tag result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSearchHit {
    pub post_id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// The document written by the JSON export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportDocument {
    pub posts: Vec<ExportedPost>,
}

/// One post in the export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
    pub tags: Vec<String>,
}

impl From<PostDetail> for ExportedPost {
    fn from(post: PostDetail) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            created_at: crate::storage::format_timestamp(&post.created_at),
            tags: post.tags,
        }
    }
}
