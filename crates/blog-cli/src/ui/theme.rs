//! Status badges.

use owo_colors::OwoColorize;

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
        }
    }

    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "[\u{2713}]",   // [✓]
            Self::Warn => "[\u{26A0}]", // [⚠]
            Self::Err => "[\u{2717}]",  // [✗]
        }
    }

    /// Badge text, colored when `color` is set.
    pub fn paint(&self, unicode: bool, color: bool) -> String {
        let label = self.display(unicode);
        if !color {
            return label.to_string();
        }
        match self {
            Self::Ok => label.green().to_string(),
            Self::Warn => label.yellow().to_string(),
            Self::Err => label.red().to_string(),
        }
    }
}
