//! Handlers for each subcommand.

mod init;
mod maintenance;
mod misc;
mod session;

pub use init::handle_init;
pub use maintenance::{handle_check, handle_prune_tags};
pub use misc::handle_completions;
pub use session::handle_session;
