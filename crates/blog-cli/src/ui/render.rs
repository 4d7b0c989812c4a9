//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table as ComfyTable};
use owo_colors::OwoColorize;

use super::context::UiContext;
use super::theme::Badge;

/// A status line: badge followed by a message.
pub fn status(ctx: &UiContext, badge: Badge, message: &str) -> String {
    format!("{} {}", badge.paint(ctx.unicode, ctx.color), message)
}

/// A `Label: value` line with the label dimmed when color is on.
pub fn kv(ctx: &UiContext, label: &str, value: &str) -> String {
    let label = format!("{}:", label);
    if ctx.color {
        format!("{} {}", label.dimmed(), value)
    } else {
        format!("{} {}", label, value)
    }
}

/// A bordered table.
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}
