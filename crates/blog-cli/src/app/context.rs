//! Application context for the blog CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use blog_core::{BlogStore, SqliteStore};

use crate::cli::Cli;
use crate::config::{default_db_path, read_config, BlogConfig};
use crate::errors::CliError;

use super::resolver::{resolve_config_path, resolve_db_path, resolve_page_size};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<BlogConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily. A missing config
    /// file is not an error.
    pub fn config(&self) -> anyhow::Result<&BlogConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                debug!(path = %path.display(), "loading config");
                read_config(&path)
            } else {
                Ok(BlogConfig::default())
            }
        })
    }

    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, self.config()?)
    }

    pub fn page_size(&self) -> anyhow::Result<u32> {
        resolve_page_size(self.cli, self.config()?)
    }

    /// Open the database and make sure the schema exists.
    ///
    /// Failure here is fatal for the process and maps to
    /// `CliError::StoreUnavailable`.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.db_path()?;

        // Only the default location is created on demand; an explicit path
        // must point into an existing directory.
        if default_db_path().ok().as_ref() == Some(&path) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CliError::store_unavailable(
                        format!("Cannot create data directory {}: {}", parent.display(), e),
                        "Hint: Pass --db or set BLOG_DB to choose another location.",
                    )
                })?;
            }
        }

        let store = SqliteStore::open(&path).map_err(|e| {
            CliError::store_unavailable(
                e.to_string(),
                "Hint: Pass --db or set BLOG_DB to choose another location.",
            )
        })?;
        store.ensure_schema().map_err(|e| {
            CliError::store_unavailable(
                format!("Cannot initialize database at {}: {}", path.display(), e),
                "Hint: Run `blog check` or `blog init --reset` to repair it.",
            )
        })?;
        Ok(store)
    }
}
