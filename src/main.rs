//! MathQuiz — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  PinPair<ChipPin> / SimulatedMedium   TerminalInput      │
//! │  (OutputMedium)                       (LineSource)       │
//! │  InterruptibleDwell ◀── CancelSignal ◀── Ctrl+C          │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │  run_quiz  ·  IndicatorScope  ·  Controller    │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{error, info, LevelFilter};

use mathquiz::adapters::backend;
use mathquiz::adapters::interrupt::{self, CancelSignal, InterruptibleDwell};
use mathquiz::adapters::terminal::TerminalInput;
use mathquiz::app::quiz::{exit_status, run_session};
use mathquiz::config::{QuizConfig, CONFIG_FILE_NAME};
use mathquiz::error::QuizError;

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("startup failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<u8> {
    info!("MathQuiz v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let config = QuizConfig::load_or_default(Path::new(CONFIG_FILE_NAME));

    // ── 2. Terminal + Ctrl+C ──────────────────────────────────
    let signal = CancelSignal::new();
    let terminal = TerminalInput::spawn(signal.clone()).context("starting stdin reader")?;
    interrupt::install_handler(signal.clone(), terminal.interrupt_sender())
        .context("installing Ctrl+C handler")?;

    // ── 3. Output medium ──────────────────────────────────────
    let medium = backend::select_medium(&config);

    // ── 4. Quiz (indicators released before this returns) ─────
    let result = run_session(
        &config,
        medium,
        InterruptibleDwell::new(signal),
        terminal,
        io::stdout(),
    );

    match &result {
        Ok(_) | Err(QuizError::StreamClosed) => {}
        Err(e) => error!("{}", e),
    }
    Ok(exit_status(&result))
}
