use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use blog_core::VERSION;

/// Blog - a single-session command-line blog manager
#[derive(Parser)]
#[command(name = "blog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the blog database
    #[arg(long, global = true, env = "BLOG_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Posts per page when listing
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Session,

    /// Create the database schema
    Init(InitArgs),

    /// Check database integrity
    Check,

    /// Delete tags that no post uses
    PruneTags,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Drop every table first. All users, posts and tags are lost.
    #[arg(long)]
    pub reset: bool,

    /// Skip the confirmation prompt for --reset
    #[arg(long, requires = "reset")]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_no_subcommand() {
        let cli = Cli::try_parse_from(["blog"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_init_reset_flags() {
        let cli = Cli::try_parse_from(["blog", "init", "--reset", "--yes"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert!(args.reset);
                assert!(args.yes);
            }
            _ => panic!("expected init"),
        }
        assert!(Cli::try_parse_from(["blog", "init", "--yes"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["blog", "session", "--db", "/tmp/x.db", "--page-size", "3"])
                .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(cli.page_size, Some(3));
    }
}
