use std::io::{self, IsTerminal};

use tracing::info;

use blog_core::BlogStore;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::errors::CliError;
use crate::session::{LinePrompter, Prompter, TerminalPrompter};
use crate::ui::render::status;
use crate::ui::{Badge, UiContext};

/// Create the schema, or with `--reset` drop and recreate it.
///
/// Opening the store already ensures the schema, so a plain `init` only
/// reports where the database lives.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let path = ctx.db_path()?;
    let store = ctx.open_store()?;
    let ui = UiContext::from_env();

    if args.reset {
        if !args.yes && !confirm_reset(&path.display().to_string())? {
            return Err(CliError::invalid_input("Reset cancelled").into());
        }
        store.reset_schema()?;
        info!(path = %path.display(), "schema reset");
        if !ctx.quiet() {
            println!(
                "{}",
                status(&ui, Badge::Warn, "All users, posts and tags were removed.")
            );
        }
    }

    if !ctx.quiet() {
        println!(
            "{}",
            status(
                &ui,
                Badge::Ok,
                &format!("Database initialized successfully at {}", path.display())
            )
        );
    }
    Ok(())
}

fn confirm_reset(path: &str) -> anyhow::Result<bool> {
    let prompt = format!("Drop every table in {}?", path);
    if io::stdin().is_terminal() {
        TerminalPrompter.confirm(&prompt)
    } else {
        LinePrompter::new(io::stdin().lock(), io::stderr()).confirm(&prompt)
    }
}
