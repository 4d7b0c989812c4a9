use std::io::{self, IsTerminal};

use tracing::debug;

use crate::app::AppContext;
use crate::session::{LinePrompter, SessionController, TerminalPrompter};
use crate::ui::UiContext;

/// Run the interactive menu until the user exits.
///
/// A terminal gets hidden password entry; piped stdin is read line by line.
pub fn handle_session(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let page_size = ctx.page_size()?;
    let ui = UiContext::from_env();
    let stdout = io::stdout();

    if io::stdin().is_terminal() {
        debug!("interactive terminal session");
        SessionController::new(&store, TerminalPrompter, stdout.lock(), page_size)
            .with_ui(ui)
            .quiet(ctx.quiet())
            .run()
    } else {
        debug!("line-oriented session on piped stdin");
        let prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
        SessionController::new(&store, prompter, stdout.lock(), page_size)
            .with_ui(ui)
            .quiet(ctx.quiet())
            .run()
    }
}
