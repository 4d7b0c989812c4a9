//! Resolution of settings from flags, environment, config file and defaults.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, default_db_path, BlogConfig};
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::errors::CliError;

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("BLOG_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// `--db` / `BLOG_DB` first, then the config file, then the XDG default.
pub fn resolve_db_path(cli: &Cli, config: &BlogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.clone() {
        return Ok(path);
    }
    if let Some(path) = config.database.path.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_db_path()
}

pub fn resolve_page_size(cli: &Cli, config: &BlogConfig) -> anyhow::Result<u32> {
    let page_size = cli
        .page_size
        .or(config.ui.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(CliError::invalid_input("Page size must be at least 1").into());
    }
    Ok(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::config::{DatabaseSection, UiSection};

    fn config(path: Option<&str>, page_size: Option<u32>) -> BlogConfig {
        BlogConfig {
            database: DatabaseSection {
                path: path.map(str::to_string),
            },
            ui: UiSection { page_size },
        }
    }

    #[test]
    fn test_flag_beats_config() {
        let cli = Cli::try_parse_from(["blog", "--db", "/flag.db", "--page-size", "7"]).unwrap();
        let cfg = config(Some("/config.db"), Some(3));
        assert_eq!(resolve_db_path(&cli, &cfg).unwrap(), PathBuf::from("/flag.db"));
        assert_eq!(resolve_page_size(&cli, &cfg).unwrap(), 7);
    }

    #[test]
    fn test_config_beats_default() {
        let cli = Cli::try_parse_from(["blog"]).unwrap();
        if cli.db.is_some() {
            // BLOG_DB is set in this environment; the flag path wins.
            return;
        }
        let cfg = config(Some("/config.db"), Some(3));
        assert_eq!(resolve_db_path(&cli, &cfg).unwrap(), PathBuf::from("/config.db"));
        assert_eq!(resolve_page_size(&cli, &cfg).unwrap(), 3);
    }

    #[test]
    fn test_default_page_size_and_zero_rejected() {
        let cli = Cli::try_parse_from(["blog"]).unwrap();
        assert_eq!(
            resolve_page_size(&cli, &config(None, None)).unwrap(),
            DEFAULT_PAGE_SIZE
        );

        let zero = Cli::try_parse_from(["blog", "--page-size", "0"]).unwrap();
        assert!(resolve_page_size(&zero, &config(None, None)).is_err());
    }
}
