//! Tracing setup for the blog CLI.
//!
//! Logs go to stderr so prompts and listings on stdout stay clean.
//!
//! Usage:
//!   blog --debug                 # Debug logging
//!   RUST_LOG=blog_core=trace blog  # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is unset. Quiet unless something goes wrong.
const DEFAULT_FILTER: &str = "warn";

/// Initialize console logging.
pub fn init_tracing(debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("blog=debug,blog_core=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
