use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{stdin, stdout, BufRead, Write};

/// The human side of an interview.
pub trait Respondent {
    /// Shown every elicitor turn as it arrives.
    fn hear(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    /// One line of input, or `None` when input has ended.
    fn answer(&mut self) -> Result<Option<String>>;
}

impl<F> Respondent for F
where
    F: FnMut() -> Result<Option<String>>,
{
    fn answer(&mut self) -> Result<Option<String>> {
        self()
    }
}

/// Reads answers from the terminal.
#[derive(Debug, Default)]
pub struct StdinRespondent;

impl Respondent for StdinRespondent {
    fn hear(&mut self, message: &str) -> Result<()> {
        let mut out = stdout();
        writeln!(out)?;
        writeln!(out, "{} {}", "Interviewer:".cyan().bold(), message.trim())?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    fn answer(&mut self) -> Result<Option<String>> {
        let mut out = stdout();
        write!(out, "{} ", "Your answer:".bold())?;
        out.flush()?;

        let stdin = stdin();
        let mut handle = stdin.lock();
        let mut input = String::new();

        let read = handle
            .read_line(&mut input)
            .context("Failed to read answer")?;
        if read == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        Ok(Some(input.trim_end_matches(['\n', '\r']).to_string()))
    }
}
