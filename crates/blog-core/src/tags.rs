//! Tag normalization.
//!
//! Tags arrive as one comma-separated string typed by the user. This module
//! turns that string into the ordered set of names that gets stored; the
//! SQLite backend then materializes tag rows and post-tag links from it.

use std::collections::HashSet;

/// Maximum characters per tag name. Enforced by the store.
pub const MAX_TAG_CHARS: usize = 50;

/// Split raw tag input into normalized tag names.
///
/// - Splits on commas and trims surrounding whitespace
/// - Drops empty names
/// - Collapses duplicates case-insensitively, keeping the first spelling
///
/// Order of first occurrence is preserved.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for candidate in raw.split(',') {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            names.push(trimmed.to_string());
        }
    }

    names
}
