use std::io::{BufRead, Write};

use anyhow::Result;

/// Asks the user yes/no questions before destructive actions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Asks on a terminal. Anything but `y` or `yes` is a no, including end of input.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Used for `--yes`.
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}
