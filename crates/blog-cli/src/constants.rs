//! Constants used throughout the CLI.

/// Posts per page when neither the flag nor the config sets one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// The database could not be opened or initialized.
    pub const STORE_UNAVAILABLE: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}
