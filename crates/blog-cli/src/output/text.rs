//! Text and table output for posts.

use chrono::{DateTime, Utc};

use blog_core::storage::{PostDetail, PostPage, TagSearchHit};

use crate::ui::render::{kv, table};
use crate::ui::UiContext;

/// Display format for post timestamps.
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Render one page of the listing with its position footer.
///
/// Rows are numbered from the first post on the page; the ID column is what
/// view and update ask for.
pub fn render_page(ctx: &UiContext, page: &PostPage) -> String {
    let offset = u64::from(page.page.saturating_sub(1)) * u64::from(page.page_size);
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .enumerate()
        .map(|(idx, post)| {
            vec![
                (offset + idx as u64 + 1).to_string(),
                post.id.to_string(),
                post.title.clone(),
            ]
        })
        .collect();

    format!(
        "\nRecent Posts:\n{}\n\nPage {} of {} (Total posts: {})",
        table(ctx, &["#", "ID", "Title"], &rows),
        page.page,
        page.total_pages,
        page.total_posts
    )
}

/// Render a single post with author, date and tags.
pub fn render_post(ctx: &UiContext, post: &PostDetail) -> String {
    let tags = if post.tags.is_empty() {
        "No tags".to_string()
    } else {
        post.tags.join(", ")
    };
    [
        String::new(),
        kv(ctx, "Title", &post.title),
        kv(ctx, "Author", &post.author),
        kv(ctx, "Date", &format_date(&post.created_at)),
        kv(ctx, "Tags", &tags),
        String::new(),
        "Content:".to_string(),
        post.content.clone(),
    ]
    .join("\n")
}

/// Render tag search results, newest first.
pub fn render_search(tag: &str, hits: &[TagSearchHit]) -> String {
    if hits.is_empty() {
        return format!("No posts found with tag '{}'", tag);
    }
    let mut lines = vec![format!("\nPosts tagged with '{}':", tag)];
    for hit in hits {
        lines.push(format!(
            "{}. {} (by {}, {})",
            hit.post_id,
            hit.title,
            hit.author,
            format_date(&hit.created_at)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::storage::PostSummary;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_render_page_numbers_rows_across_pages() {
        let page = PostPage {
            items: vec![
                PostSummary { id: 7, title: "Seventh".to_string() },
                PostSummary { id: 6, title: "Sixth".to_string() },
            ],
            page: 2,
            page_size: 5,
            total_posts: 7,
            total_pages: 2,
        };
        let out = render_page(&UiContext::plain(), &page);
        assert!(out.contains("Seventh"));
        assert!(out.contains("| 6 "));
        assert!(out.contains("| 7 "));
        assert!(out.ends_with("Page 2 of 2 (Total posts: 7)"));
    }

    #[test]
    fn test_render_post_without_tags() {
        let post = PostDetail {
            id: 1,
            title: "Hello".to_string(),
            content: "Body text".to_string(),
            author: "alice".to_string(),
            created_at: at(),
            tags: Vec::new(),
        };
        let out = render_post(&UiContext::plain(), &post);
        assert!(out.contains("Title: Hello"));
        assert!(out.contains("Author: alice"));
        assert!(out.contains("Date: 2024-03-09 14:05:00"));
        assert!(out.contains("Tags: No tags"));
        assert!(out.ends_with("Content:\nBody text"));
    }

    #[test]
    fn test_render_search() {
        assert_eq!(render_search("none", &[]), "No posts found with tag 'none'");

        let hits = vec![TagSearchHit {
            post_id: 3,
            title: "Rusty".to_string(),
            author: "bob".to_string(),
            created_at: at(),
        }];
        let out = render_search("rust", &hits);
        assert!(out.contains("Posts tagged with 'rust':"));
        assert!(out.contains("3. Rusty (by bob, 2024-03-09 14:05:00)"));
    }
}
