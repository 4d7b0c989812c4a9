//! Console prompting.
//!
//! A terminal gets `dialoguer` prompts with hidden password entry. Piped
//! stdin gets plain line reads so the session can be scripted.

use std::fmt;
use std::io::{BufRead, Write};

use dialoguer::{Confirm, Input, Password};
use zeroize::Zeroizing;

/// Source of answers for the interactive session.
pub trait Prompter {
    /// Ask for one line of text. The answer may be empty.
    fn line(&mut self, prompt: &str) -> anyhow::Result<String>;

    /// Ask for a secret without echoing it when possible.
    fn secret(&mut self, prompt: &str) -> anyhow::Result<Zeroizing<String>>;

    /// Ask a yes/no question. Anything but `y`/`yes` is no.
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool>;
}

/// Input ended before the session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl fmt::Display for InputClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input closed")
    }
}

impl std::error::Error for InputClosed {}

/// True when `err` means stdin is exhausted.
pub fn is_input_closed(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InputClosed>().is_some()
}

/// True when `err` came from reading or writing the console itself. The
/// session cannot continue after one of these.
pub fn is_console_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>().is_some()
}

/// Prompts on an interactive terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn line(&mut self, prompt: &str) -> anyhow::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(map_dialoguer_error)
    }

    fn secret(&mut self, prompt: &str) -> anyhow::Result<Zeroizing<String>> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(map_dialoguer_error)
    }

    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(map_dialoguer_error)
    }
}

fn map_dialoguer_error(err: dialoguer::Error) -> anyhow::Error {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            anyhow::Error::new(InputClosed)
        }
        dialoguer::Error::IO(io) => anyhow::Error::new(io).context("Failed to read input"),
    }
}

/// Prompts over plain reader/writer pairs, one answer per line.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(InputClosed.into());
        }
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        Ok(buf)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn line(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.read_answer(prompt)
    }

    fn secret(&mut self, prompt: &str) -> anyhow::Result<Zeroizing<String>> {
        self.read_answer(prompt).map(Zeroizing::new)
    }

    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        let answer = self.read_answer(&format!("{} [y/N]", prompt))?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}
