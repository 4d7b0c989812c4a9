//! Menu actions other than browsing.

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use blog_core::export::write_export;
use blog_core::storage::{NewPost, PostUpdate};
use blog_core::tags::parse_tag_list;
use blog_core::{auth, BlogError, BlogStore};

use super::prompt::Prompter;
use super::SessionController;
use crate::errors::CliError;
use crate::output::render_search;

impl<S, P, W> SessionController<'_, S, P, W>
where
    S: BlogStore + ?Sized,
    P: Prompter,
    W: Write,
{
    pub(super) fn login(&mut self) -> anyhow::Result<()> {
        let username = self.prompter.line("Username")?;
        let password = self.prompter.secret("Password")?;
        let session = self.slot.login(self.store, &username, &password)?;
        let message = format!("Welcome, {}!", session.username());
        self.success(&message)
    }

    pub(super) fn register(&mut self) -> anyhow::Result<()> {
        let username = self.prompter.line("Choose a username")?;
        let password = self.prompter.secret("Choose a password")?;
        auth::register(self.store, &username, &password)?;
        self.success("Registration successful! Please login.")
    }

    pub(super) fn logout(&mut self) -> anyhow::Result<()> {
        if let Some(session) = self.slot.logout() {
            info!(user_id = session.user_id(), "user logged out");
        }
        self.success("Logged out successfully.")
    }

    pub(super) fn create_post(&mut self) -> anyhow::Result<()> {
        let session = self.require_session()?;
        let title = self.prompter.line("Enter post title")?;
        let content = self.prompter.line("Enter post content")?;
        let tags = self.prompter.line("Enter comma-separated tags")?;

        let post = NewPost::new(title, content).with_tags(tags);
        let post_id = self.store.create_post(&session, &post)?;

        let (title, tag_count) = match self.store.get_post(post_id)? {
            Some(created) => (created.title, created.tags.len()),
            None => (post.title.trim().to_string(), parse_tag_list(&post.tags).len()),
        };
        self.success(&format!(
            "Post '{}' created successfully with {} tags.",
            title, tag_count
        ))
    }

    pub(super) fn update_post(&mut self) -> anyhow::Result<()> {
        let session = self.require_session()?;
        let post_id = self.read_post_id("Enter the ID of the post to update")?;

        // Check before prompting so a stranger's post never shows its fields.
        let current = match self.store.get_post(post_id)? {
            Some(post) if post.author == session.username() => post,
            _ => return Err(BlogError::NotFoundOrNotOwned(post_id).into()),
        };

        let title = self
            .prompter
            .line(&format!("New title [{}]", current.title))?;
        let content = self
            .prompter
            .line("New content (press Enter to keep current)")?;
        let tags = self
            .prompter
            .line("New comma-separated tags (leave blank to keep current)")?;

        let update = PostUpdate::from_input(&title, &content, &tags);
        if update.is_empty() {
            return self.say("No changes made.");
        }
        self.store.update_post(&session, post_id, &update)?;
        self.success("Post updated successfully!")
    }

    pub(super) fn search_by_tag(&mut self) -> anyhow::Result<()> {
        let tag = self.prompter.line("Enter tag to search for")?;
        let tag = tag.trim();
        let hits = self.store.search_by_tag(tag)?;
        self.say(&render_search(tag, &hits))
    }

    pub(super) fn export(&mut self) -> anyhow::Result<()> {
        let filename = self
            .prompter
            .line("Enter filename for export (e.g., posts.json)")?;
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(CliError::invalid_input("Filename cannot be empty").into());
        }

        let path = PathBuf::from(filename);
        let document = self.store.export_all()?;
        write_export(&path, &document)?;
        self.success(&format!(
            "Exported {} posts to {}",
            document.posts.len(),
            path.display()
        ))
    }
}
