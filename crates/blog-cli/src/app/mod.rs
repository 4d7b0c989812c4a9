//! Application-level utilities for the blog CLI.
//!
//! This module provides:
//! - Path resolution for config and database files
//! - The application context shared by command handlers

mod context;
mod resolver;

pub use context::AppContext;
