//! Output formatting helpers for the CLI.
//!
//! Listings, post details and search results rendered as text for the
//! interactive session.

mod text;

pub use text::{render_page, render_post, render_search};
