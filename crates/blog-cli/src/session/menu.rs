//! Menu choices for the two session states.

use std::str::FromStr;

use crate::errors::CliError;

const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Choices offered before anyone has logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestChoice {
    Login,
    Register,
    Exit,
}

impl GuestChoice {
    pub const MENU: &'static [(&'static str, &'static str)] =
        &[("1", "Login"), ("2", "Register"), ("0", "Exit")];
}

impl FromStr for GuestChoice {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Login),
            "2" => Ok(Self::Register),
            "0" => Ok(Self::Exit),
            _ => Err(CliError::invalid_input(INVALID_CHOICE)),
        }
    }
}

/// Choices offered to a logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberChoice {
    CreatePost,
    ListPosts,
    ViewPost,
    UpdatePost,
    SearchByTag,
    Export,
    Logout,
    Exit,
}

impl MemberChoice {
    pub const MENU: &'static [(&'static str, &'static str)] = &[
        ("1", "Create a new post"),
        ("2", "List all posts"),
        ("3", "View a specific post"),
        ("4", "Update a post"),
        ("5", "Search posts by tag"),
        ("6", "Export posts to JSON"),
        ("7", "Logout"),
        ("0", "Exit"),
    ];
}

impl FromStr for MemberChoice {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::CreatePost),
            "2" => Ok(Self::ListPosts),
            "3" => Ok(Self::ViewPost),
            "4" => Ok(Self::UpdatePost),
            "5" => Ok(Self::SearchByTag),
            "6" => Ok(Self::Export),
            "7" => Ok(Self::Logout),
            "0" => Ok(Self::Exit),
            _ => Err(CliError::invalid_input(INVALID_CHOICE)),
        }
    }
}

/// Navigation inside the paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseChoice {
    Next,
    Previous,
    View,
    Quit,
}

impl FromStr for BrowseChoice {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" | "previous" => Ok(Self::Previous),
            "v" | "view" => Ok(Self::View),
            "q" | "quit" => Ok(Self::Quit),
            _ => Err(CliError::invalid_input(INVALID_CHOICE)),
        }
    }
}

/// Render a menu as `"N. Label"` lines under a heading.
pub fn render_menu(entries: &[(&str, &str)]) -> String {
    let mut out = String::from("\nBlog Post Manager\n");
    for (key, label) in entries {
        out.push_str(&format!("{}. {}\n", key, label));
    }
    out
}
