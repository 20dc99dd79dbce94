//! Port traits: the boundary between the quiz core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ IndicatorController / Quiz (domain)
//! ```
//!
//! Driven adapters (output medium, terminal, timing) implement these
//! traits.  The controller and the quiz loop consume them via generics,
//! so the domain never touches GPIO registers or stdin directly.

use core::fmt;
use core::time::Duration;
use std::io;

pub use embedded_hal::digital::PinState;

// ───────────────────────────────────────────────────────────────
// Line identity
// ───────────────────────────────────────────────────────────────

/// Stable identifier of one output line (BCM GPIO number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Output medium (driven adapter: domain → GPIO)
// ───────────────────────────────────────────────────────────────

/// The physical or simulated substrate the indicator lines live on.
///
/// Writes are in terms of physical [`PinState`]; polarity is the
/// controller's concern, not the medium's.
pub trait OutputMedium {
    /// Claim `line` and configure it as an output.
    ///
    /// On error nothing is left claimed for `line`.
    fn configure_output(&mut self, line: LineId) -> Result<(), MediumError>;

    /// Drive `line` to `level`.
    fn write(&mut self, line: LineId, level: PinState) -> Result<(), MediumError>;

    /// Give every line in `lines` back to the system.
    fn release(&mut self, lines: &[LineId]) -> Result<(), MediumError>;
}

impl<M: OutputMedium + ?Sized> OutputMedium for Box<M> {
    fn configure_output(&mut self, line: LineId) -> Result<(), MediumError> {
        (**self).configure_output(line)
    }

    fn write(&mut self, line: LineId, level: PinState) -> Result<(), MediumError> {
        (**self).write(line, level)
    }

    fn release(&mut self, lines: &[LineId]) -> Result<(), MediumError> {
        (**self).release(lines)
    }
}

// ───────────────────────────────────────────────────────────────
// Dwell (driven adapter: domain → wall clock)
// ───────────────────────────────────────────────────────────────

/// Marker returned when a dwell was cut short by a user interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Blocks the caller for the length of a pulse.
pub trait Dwell {
    /// Wait for `duration`.  Returns early with [`Cancelled`] if the user
    /// asked the program to stop.
    fn dwell(&mut self, duration: Duration) -> Result<(), Cancelled>;
}

impl<D: Dwell + ?Sized> Dwell for &mut D {
    fn dwell(&mut self, duration: Duration) -> Result<(), Cancelled> {
        (**self).dwell(duration)
    }
}

/// Returns immediately.  Used where timing is irrelevant (tests, dry runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDwell;

impl Dwell for NoDwell {
    fn dwell(&mut self, _duration: Duration) -> Result<(), Cancelled> {
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Line source (driving adapter: terminal → domain)
// ───────────────────────────────────────────────────────────────

/// One unit of terminal input as seen by the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// A line of text, without its trailing newline.
    Line(String),
    /// The input stream ended.
    Closed,
    /// The user interrupted the program.
    Cancelled,
}

/// Supplies whole lines of user input, blocking until one is available.
pub trait LineSource {
    fn next_line(&mut self) -> InputLine;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`OutputMedium`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediumError {
    /// The medium is absent or cannot be used at all.
    Unavailable(&'static str),
    /// An OS-level I/O call failed.
    Io {
        line: Option<LineId>,
        kind: io::ErrorKind,
    },
    /// A line was addressed that the medium does not manage.
    UnknownLine(LineId),
    /// Failure raised deliberately by a test double.
    Injected(&'static str),
}

impl MediumError {
    pub fn io(line: Option<LineId>, err: &io::Error) -> Self {
        Self::Io {
            line,
            kind: err.kind(),
        }
    }
}

impl fmt::Display for MediumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "output medium unavailable: {}", msg),
            Self::Io {
                line: Some(line),
                kind,
            } => write!(f, "I/O error on {}: {}", line, kind),
            Self::Io { line: None, kind } => write!(f, "I/O error: {}", kind),
            Self::UnknownLine(line) => write!(f, "{} is not managed by this medium", line),
            Self::Injected(msg) => write!(f, "injected fault: {}", msg),
        }
    }
}
