//! Unified error type for the quiz.
//!
//! Every fallible path in the crate funnels into [`QuizError`], keeping the
//! top-level exit-status mapping in one place.  All variants are `Copy` so
//! they can be carried out of a `Drop`-guarded scope without allocation.

use core::fmt;
use std::io;

use crate::app::ports::{Cancelled, MediumError};

// ---------------------------------------------------------------------------
// Top-level quiz error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizError {
    /// Text that does not parse as an integer.  Recovered by re-prompting.
    InvalidInput,
    /// The input stream ended while a value was still needed.
    StreamClosed,
    /// The output medium could not be configured.  No rounds run.
    ResourceUnavailable(MediumError),
    /// The user interrupted the program.  Not a failure.
    UserCancelled,
    /// Releasing the output medium failed.  Logged, never propagated.
    ReleaseFailure(MediumError),
    /// A write to an already-configured line failed mid-round.
    Medium(MediumError),
    /// Writing a prompt or result line to the terminal failed.
    Terminal(io::ErrorKind),
    /// Configuration is invalid.
    Config(&'static str),
}

impl QuizError {
    /// Process exit status this error maps to.
    ///
    /// Only a cancelled run counts as success; everything that reaches the
    /// top level otherwise ends the process with status `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UserCancelled => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "input is not a valid integer"),
            Self::StreamClosed => write!(f, "input stream closed"),
            Self::ResourceUnavailable(e) => write!(f, "indicator lines unavailable: {e}"),
            Self::UserCancelled => write!(f, "cancelled by user"),
            Self::ReleaseFailure(e) => write!(f, "indicator release failed: {e}"),
            Self::Medium(e) => write!(f, "indicator write failed: {e}"),
            Self::Terminal(kind) => write!(f, "terminal: {kind}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for QuizError {}

impl From<Cancelled> for QuizError {
    fn from(_: Cancelled) -> Self {
        Self::UserCancelled
    }
}

impl From<io::Error> for QuizError {
    fn from(e: io::Error) -> Self {
        Self::Terminal(e.kind())
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, QuizError>;
