//! The interactive session loop.
//!
//! A `SessionController` shows the guest or member menu, reads a choice and
//! runs the matching action. Errors from an action are reported and the loop
//! carries on; only an exit choice or closed input ends the session.

mod actions;
mod browse;
pub mod menu;
pub mod prompt;

use std::io::Write;

use tracing::{debug, warn};

use blog_core::{BlogError, BlogStore, Session, SessionSlot};

use crate::errors::CliError;
use crate::ui::render::status;
use crate::ui::{Badge, UiContext};

use menu::{render_menu, GuestChoice, MemberChoice};
pub use prompt::{is_console_failure, is_input_closed, LinePrompter, Prompter, TerminalPrompter};

const GOODBYE: &str = "Exiting Blog Post Manager. Goodbye!";

/// What the loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Drives one interactive session against a store.
pub struct SessionController<'s, S: ?Sized, P, W> {
    store: &'s S,
    prompter: P,
    out: W,
    slot: SessionSlot,
    ui: UiContext,
    page_size: u32,
    quiet: bool,
}

impl<'s, S, P, W> SessionController<'s, S, P, W>
where
    S: BlogStore + ?Sized,
    P: Prompter,
    W: Write,
{
    pub fn new(store: &'s S, prompter: P, out: W, page_size: u32) -> Self {
        Self {
            store,
            prompter,
            out,
            slot: SessionSlot::new(),
            ui: UiContext::plain(),
            page_size,
            quiet: false,
        }
    }

    pub fn with_ui(mut self, ui: UiContext) -> Self {
        self.ui = ui;
        self
    }

    /// Hide the menus; prompts and results are still shown.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run until the user exits or input runs out.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) if is_input_closed(&err) => {
                    debug!("input closed, ending session");
                    break;
                }
                Err(err) if is_console_failure(&err) => {
                    debug!(error = %err, "console unusable, ending session");
                    return Err(err);
                }
                Err(err) => self.report(&err),
            }
        }
        writeln!(self.out, "{}", GOODBYE)?;
        self.slot.logout();
        Ok(())
    }

    fn step(&mut self) -> anyhow::Result<Flow> {
        if self.slot.is_authenticated() {
            self.show_menu(MemberChoice::MENU)?;
            let choice = self.prompter.line("Enter your choice")?.parse::<MemberChoice>()?;
            self.member_action(choice)
        } else {
            self.show_menu(GuestChoice::MENU)?;
            let choice = self.prompter.line("Enter your choice")?.parse::<GuestChoice>()?;
            self.guest_action(choice)
        }
    }

    fn show_menu(&mut self, entries: &[(&str, &str)]) -> anyhow::Result<()> {
        if !self.quiet {
            write!(self.out, "{}", render_menu(entries))?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn guest_action(&mut self, choice: GuestChoice) -> anyhow::Result<Flow> {
        match choice {
            GuestChoice::Login => self.login()?,
            GuestChoice::Register => self.register()?,
            GuestChoice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn member_action(&mut self, choice: MemberChoice) -> anyhow::Result<Flow> {
        match choice {
            MemberChoice::CreatePost => self.create_post()?,
            MemberChoice::ListPosts => self.browse()?,
            MemberChoice::ViewPost => {
                let post_id = self.read_post_id("Enter the ID of the post to view")?;
                self.view_post(post_id)?;
            }
            MemberChoice::UpdatePost => self.update_post()?,
            MemberChoice::SearchByTag => self.search_by_tag()?,
            MemberChoice::Export => self.export()?,
            MemberChoice::Logout => self.logout()?,
            MemberChoice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// The logged-in session. Member actions are only reachable with one.
    fn require_session(&self) -> anyhow::Result<Session> {
        self.slot
            .current()
            .cloned()
            .ok_or_else(|| CliError::invalid_input("Please login first.").into())
    }

    fn read_post_id(&mut self, prompt: &str) -> anyhow::Result<i64> {
        let raw = self.prompter.line(prompt)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| CliError::invalid_input("Invalid post ID. Please enter a number.").into())
    }

    fn say(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    fn success(&mut self, message: &str) -> anyhow::Result<()> {
        let line = status(&self.ui, Badge::Ok, message);
        self.say(&line)
    }

    fn report(&mut self, err: &anyhow::Error) {
        let (message, expected) = user_message(err);
        if expected {
            debug!(error = %err, "action rejected");
        } else {
            warn!(error = %err, "action failed");
        }
        // Keep stdout ordered ahead of the error line.
        let _ = self.out.flush();
        let ui = UiContext {
            color: false,
            unicode: self.ui.unicode,
        };
        eprintln!("{}", status(&ui, Badge::Err, &message));
    }
}

/// The message shown for a failed action, and whether the failure was the
/// user's doing rather than a fault.
fn user_message(err: &anyhow::Error) -> (String, bool) {
    if let Some(blog) = err.downcast_ref::<BlogError>() {
        let message = match blog {
            BlogError::AuthenticationFailed => {
                "Authentication failed. Please try again.".to_string()
            }
            BlogError::NotFoundOrNotOwned(_) => {
                "Post not found or you don't have permission to edit it.".to_string()
            }
            other => other.to_string(),
        };
        return (message, blog.is_user_error());
    }
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return (cli.to_string(), true);
    }
    (format!("{:#}", err), false)
}
