//! Paginated listing and single-post view.

use std::io::Write;

use blog_core::BlogStore;

use super::menu::BrowseChoice;
use super::prompt::Prompter;
use super::SessionController;
use crate::output::{render_page, render_post};

impl<S, P, W> SessionController<'_, S, P, W>
where
    S: BlogStore + ?Sized,
    P: Prompter,
    W: Write,
{
    /// List posts a page at a time until the user quits.
    ///
    /// Moving past either end stays on the current page. Errors from viewing
    /// a post are reported without leaving the listing.
    pub(super) fn browse(&mut self) -> anyhow::Result<()> {
        let mut page = 1;
        loop {
            let listing = self.store.list_posts(page, self.page_size)?;
            if listing.total_pages == 0 {
                return self.say("No posts found.");
            }
            // Posts may have vanished since the last page was shown.
            if listing.items.is_empty() && page > listing.total_pages {
                page = listing.total_pages;
                continue;
            }
            let rendered = render_page(&self.ui, &listing);
            self.say(&rendered)?;

            let answer = self
                .prompter
                .line("\n[n]ext, [p]revious, [v]iew post, or [q]uit")?;
            match answer.parse::<BrowseChoice>() {
                Ok(BrowseChoice::Next) if listing.has_next() => page += 1,
                Ok(BrowseChoice::Previous) if listing.has_previous() => page -= 1,
                Ok(BrowseChoice::View) => {
                    let viewed = self
                        .read_post_id("Enter post ID to view")
                        .and_then(|post_id| self.view_post(post_id));
                    if let Err(err) = viewed {
                        if super::is_input_closed(&err) || super::is_console_failure(&err) {
                            return Err(err);
                        }
                        self.report(&err);
                    }
                }
                Ok(BrowseChoice::Quit) => return Ok(()),
                _ => {}
            }
        }
    }

    pub(super) fn view_post(&mut self, post_id: i64) -> anyhow::Result<()> {
        match self.store.get_post(post_id)? {
            Some(post) => {
                let rendered = render_post(&self.ui, &post);
                self.say(&rendered)
            }
            None => self.say(&format!("No post found with ID {}", post_id)),
        }
    }
}
