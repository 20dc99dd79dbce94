//! Prompted terminal input.
//!
//! [`Console`] pairs a [`LineSource`] with the writer prompts go to.
//! Integer prompts repeat until the reply parses; a closed stream or a
//! user interrupt ends the prompt with the matching [`QuizError`].

use std::io::Write;

use log::debug;

use crate::app::ports::{InputLine, LineSource};
use crate::error::{QuizError, Result};

pub const INVALID_INTEGER_MSG: &str = "❌ Please enter a valid integer.";
pub const STREAM_CLOSED_MSG: &str = "⚠️  Input stream closed.";

/// Parse one reply as an integer.  Surrounding whitespace and a leading
/// sign are accepted; anything else is [`QuizError::InvalidInput`].
pub fn parse_integer(text: &str) -> Result<i64> {
    text.trim().parse().map_err(|_| QuizError::InvalidInput)
}

pub struct Console<S, W> {
    source: S,
    out: W,
}

impl<S: LineSource, W: Write> Console<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self { source, out }
    }

    /// Print one full line.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Show `prompt` and return the next raw line of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        match self.source.next_line() {
            InputLine::Line(text) => Ok(text),
            InputLine::Closed => {
                writeln!(self.out)?;
                writeln!(self.out, "{STREAM_CLOSED_MSG}")?;
                Err(QuizError::StreamClosed)
            }
            InputLine::Cancelled => Err(QuizError::UserCancelled),
        }
    }

    /// Show `prompt` until the reply parses as an integer.
    pub fn read_integer(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let text = self.read_line(prompt)?;
            match parse_integer(&text) {
                Ok(n) => return Ok(n),
                Err(_) => {
                    debug!("rejected non-integer input {:?}", text);
                    self.say(INVALID_INTEGER_MSG)?;
                }
            }
        }
    }

    pub fn out(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (S, W) {
        (self.source, self.out)
    }
}
