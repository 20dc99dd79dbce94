//! The quiz loop.
//!
//! ```text
//!   banner ─▶ acquire IndicatorScope ─▶ round* ─▶ scope drop (release)
//! ```
//!
//! Each round reads two operands and a claimed sum, pulses exactly one
//! indicator, and asks whether to go again.  The indicator scope is held
//! for the whole loop, so every way out of it (declining, interrupt,
//! closed stream, medium fault, panic) passes through release.

use core::time::Duration;
use std::io::Write;

use log::{info, warn};

use crate::app::input::Console;
use crate::app::ports::{Dwell, LineSource, OutputMedium};
use crate::config::QuizConfig;
use crate::drivers::indicator::{Indicator, IndicatorController, IndicatorScope};
use crate::error::{QuizError, Result};

const RULE: &str = "==================================================";
pub const GOODBYE_MSG: &str = "👋 Quiz ended. Goodbye!";

// ───────────────────────────────────────────────────────────────
// Round
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

/// Two operands and the user's claimed sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRound {
    pub a: i64,
    pub b: i64,
    pub claimed: i64,
}

impl QuizRound {
    /// `a + b` with two's-complement wraparound.
    pub fn expected(&self) -> i64 {
        self.a.wrapping_add(self.b)
    }

    pub fn verdict(&self) -> Verdict {
        if self.claimed == self.expected() {
            Verdict::Correct
        } else {
            Verdict::Wrong
        }
    }

    /// The indicator this round lights.
    pub fn indicator(&self) -> Indicator {
        match self.verdict() {
            Verdict::Correct => Indicator::Success,
            Verdict::Wrong => Indicator::Failure,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Summary
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The user answered anything but "y" to "Try another?".
    Declined,
    /// The user interrupted.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub rounds: u32,
    pub correct: u32,
    pub ending: Ending,
}

// ───────────────────────────────────────────────────────────────
// Loop
// ───────────────────────────────────────────────────────────────

/// Run the quiz until the user stops.
///
/// Returns a summary for a declined or interrupted session.  A closed
/// input stream, unavailable indicators or a mid-round medium fault come
/// back as errors, after the indicators have been released.
pub fn run_quiz<M, D, S, W>(
    controller: &mut IndicatorController<M, D>,
    console: &mut Console<S, W>,
    pulse: Duration,
) -> Result<QuizSummary>
where
    M: OutputMedium,
    D: Dwell,
    S: LineSource,
    W: Write,
{
    print_banner(console)?;

    let mut indicators = IndicatorScope::acquire(controller)?;
    let mut tally = (0u32, 0u32);

    let ending = match play_rounds(&mut *indicators, console, pulse, &mut tally) {
        Ok(()) => Ending::Declined,
        Err(QuizError::UserCancelled) => {
            console.say("")?;
            console.say("")?;
            console.say(GOODBYE_MSG)?;
            Ending::Cancelled
        }
        Err(e) => {
            warn!("quiz stopped after {} round(s): {}", tally.0, e);
            return Err(e);
        }
    };
    drop(indicators);

    let summary = QuizSummary {
        rounds: tally.0,
        correct: tally.1,
        ending,
    };
    info!(
        "quiz finished: {}/{} correct ({:?})",
        summary.correct, summary.rounds, summary.ending
    );
    Ok(summary)
}

/// Build the controller and console from `config` and run one session.
pub fn run_session<M, D, S, W>(
    config: &QuizConfig,
    medium: M,
    dwell: D,
    source: S,
    out: W,
) -> Result<QuizSummary>
where
    M: OutputMedium,
    D: Dwell,
    S: LineSource,
    W: Write,
{
    config.validate()?;
    let mut controller = IndicatorController::from_config(medium, dwell, config);
    let mut console = Console::new(source, out);
    run_quiz(&mut controller, &mut console, config.pulse_duration())
}

/// Process exit status for a finished session.
pub fn exit_status(result: &Result<QuizSummary>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}

fn print_banner<S: LineSource, W: Write>(console: &mut Console<S, W>) -> Result<()> {
    console.say("")?;
    console.say(RULE)?;
    console.say("🧮 RASPBERRY PI MATH QUIZ")?;
    console.say(RULE)?;
    console.say("Answer correctly to see the GREEN light!")?;
    console.say("Wrong answers get the RED light.")?;
    console.say("")
}

fn play_rounds<M, D, S, W>(
    indicators: &mut IndicatorController<M, D>,
    console: &mut Console<S, W>,
    pulse: Duration,
    tally: &mut (u32, u32),
) -> Result<()>
where
    M: OutputMedium,
    D: Dwell,
    S: LineSource,
    W: Write,
{
    loop {
        let a = console.read_integer("Enter first number: ")?;
        let b = console.read_integer("Enter second number: ")?;
        let claimed = console.read_integer(&format!("What is {a} + {b}? "))?;
        let round = QuizRound { a, b, claimed };
        let expected = round.expected();

        match round.verdict() {
            Verdict::Correct => {
                console.say(&format!("✅ Correct! {a} + {b} = {expected}"))?;
                console.say("🟢 Green LED ON")?;
            }
            Verdict::Wrong => {
                console.say(&format!(
                    "❌ Wrong! {a} + {b} = {expected} (you said {claimed})"
                ))?;
                console.say("🔴 Red LED ON")?;
            }
        }
        tally.0 += 1;
        if round.verdict() == Verdict::Correct {
            tally.1 += 1;
        }
        indicators.pulse(round.indicator(), pulse)?;

        console.say("")?;
        let again = console.read_line("Try another? (y/n): ")?;
        if !again.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        console.say("")?;
    }
}
