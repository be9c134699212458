use anyhow::{Context, Result};
use std::io::{stdin, stdout, BufRead, Write};

/// Human confirmation before any generated code is written.
pub trait Confirm {
    /// Ask `question`; true only on an explicit affirmative.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self(question)
    }
}

/// Prompts on stdout and reads one line from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let mut out = stdout();
        write!(out, "{question} [y/n]: ")?;
        out.flush()?;

        let stdin = stdin();
        let mut handle = stdin.lock();
        let mut input = String::new();

        handle
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        Ok(is_affirmative(&input))
    }
}

/// `y` or `yes`, case-insensitive. Anything else, including no input, is a refusal.
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
