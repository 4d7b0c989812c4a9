//! UI primitives for the blog CLI.
//!
//! - **Context**: Environment detection (TTY, color, unicode)
//! - **Theme**: Status badges
//! - **Render**: Tables, key/value lines, status lines

mod context;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;
