use blog_core::BlogStore;

use crate::app::AppContext;
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- pages: OK");
                println!("- foreign keys: OK");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            eprintln!("Hint: Export your posts before running `blog init --reset`.");
            Err(CliError::IntegrityFailed(err.to_string()).into())
        }
    }
}

pub fn handle_prune_tags(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let removed = store.prune_unused_tags()?;
    if !ctx.quiet() {
        match removed {
            0 => println!("No unused tags."),
            1 => println!("Removed 1 unused tag."),
            n => println!("Removed {} unused tags.", n),
        }
    }
    Ok(())
}
