//! UI context for environment detection.

use std::io::IsTerminal;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode box drawing and symbols are enabled
    pub unicode: bool,
}

impl UiContext {
    /// Create context from the environment.
    ///
    /// Color is disabled when stdout is not a TTY, `NO_COLOR` is set, or
    /// `TERM=dumb`.
    pub fn from_env() -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color_env && !term_is_dumb,
            unicode: is_tty && !term_is_dumb,
        }
    }

    /// Plain output: no color, ASCII only.
    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
        }
    }
}
