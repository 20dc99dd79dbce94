//! Indicator lifecycle under every way a session can end.
//!
//! Each test walks a fault (interrupt, panic, medium write failure) across
//! every step of a round and checks that both lines finish Deasserted and
//! the medium is released exactly once.

use std::panic::{self, AssertUnwindSafe};

use std::time::Duration;

use crate::mock_hw::{
    line, run_script, run_with, test_config, Board, ScriptedInput, FAILURE, SUCCESS,
};

use mathquiz::adapters::backend;
use mathquiz::adapters::cdev;
use mathquiz::adapters::sim::{MediumEvent, SimulatedMedium};
use mathquiz::app::ports::{InputLine, NoDwell, PinState};
use mathquiz::app::quiz::{exit_status, run_session};
use mathquiz::config::{Backend, QuizConfig};
use mathquiz::drivers::indicator::{Indicator, IndicatorController, LineState, Polarity};
use mathquiz::error::QuizError;

/// Inputs for one full round that asks to continue, then a declined one.
const TWO_ROUNDS: [&str; 8] = ["3", "4", "7", "y", "2", "2", "5", "n"];

fn release_count(events: &[MediumEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, MediumEvent::Released(_)))
        .count()
}

#[test]
fn initialize_then_release_with_no_rounds() {
    let medium = SimulatedMedium::new();
    let journal = medium.journal();
    let mut c = IndicatorController::new(medium, NoDwell, SUCCESS, FAILURE, Polarity::ActiveLow);

    c.initialize().unwrap();
    c.release().unwrap();

    assert_eq!(c.line_state(Indicator::Success), LineState::Uninitialized);
    assert_eq!(c.line_state(Indicator::Failure), LineState::Uninitialized);
    assert_eq!(journal.level(SUCCESS), Some(PinState::High));
    assert_eq!(journal.level(FAILURE), Some(PinState::High));
    assert!(journal.is_released());
    assert!(!journal.is_configured(SUCCESS));
}

#[test]
fn active_high_wiring_idles_low() {
    let medium = SimulatedMedium::new();
    let journal = medium.journal();
    let config = mathquiz::config::QuizConfig {
        active_low: false,
        ..test_config(0)
    };
    let mut c = IndicatorController::from_config(medium, NoDwell, &config);
    c.initialize().unwrap();
    c.pulse(Indicator::Success, std::time::Duration::ZERO).unwrap();
    c.release().unwrap();

    assert_eq!(
        journal.writes_to(SUCCESS),
        vec![PinState::Low, PinState::High, PinState::Low, PinState::Low]
    );
}

#[test]
fn interrupt_at_every_read_is_safe() {
    for k in 0..TWO_ROUNDS.len() {
        let mut items: Vec<InputLine> = TWO_ROUNDS[..k].iter().map(|l| line(l)).collect();
        items.push(InputLine::Cancelled);
        let s = run_script(ScriptedInput::new(items));

        assert_eq!(exit_status(&s.result), 0, "interrupt at read {k}");
        assert!(s.is_safe(), "interrupt at read {k} left a line asserted");
        assert_eq!(release_count(&s.journal.events()), 1);
    }
}

#[test]
fn closed_stream_at_every_read_is_safe() {
    for k in 0..TWO_ROUNDS.len() {
        let s = run_script(ScriptedInput::lines(&TWO_ROUNDS[..k]));

        assert_eq!(s.result, Err(QuizError::StreamClosed), "closed at read {k}");
        assert_eq!(exit_status(&s.result), 1);
        assert!(s.is_safe(), "closed at read {k} left a line asserted");
    }
}

#[test]
fn panic_at_every_read_is_safe() {
    for k in 0..TWO_ROUNDS.len() {
        let medium = SimulatedMedium::new();
        let journal = medium.journal();
        let input = ScriptedInput::lines(&TWO_ROUNDS).panic_at(k);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut out = Vec::new();
            run_session(&test_config(0), medium, NoDwell, input, &mut out)
        }));

        assert!(outcome.is_err(), "read {k} should have panicked");
        assert_eq!(journal.level(SUCCESS), Some(PinState::High), "panic at read {k}");
        assert_eq!(journal.level(FAILURE), Some(PinState::High), "panic at read {k}");
        assert!(journal.is_released(), "panic at read {k} skipped release");
    }
}

#[test]
fn write_fault_at_every_write_is_safe() {
    // Two lines idled at init, then assert + deassert per round.
    let writes_in_session = 2 + 2 * 2;
    for k in 0..writes_in_session {
        let medium = SimulatedMedium::new();
        medium.journal().fail_write_after(k);
        let s = run_with(ScriptedInput::lines(&TWO_ROUNDS), medium, NoDwell, 0);

        match k {
            0 | 1 => assert!(
                matches!(s.result, Err(QuizError::ResourceUnavailable(_))),
                "fault at write {k}: {:?}",
                s.result
            ),
            _ => assert!(
                matches!(s.result, Err(QuizError::Medium(_))),
                "fault at write {k}: {:?}",
                s.result
            ),
        }
        assert_eq!(exit_status(&s.result), 1);
        assert!(s.journal.is_released(), "fault at write {k} skipped release");
        if k >= 2 {
            assert!(s.is_safe(), "fault at write {k} left a line asserted");
        }
    }
}

#[test]
fn release_failure_does_not_mask_exit_reason() {
    let medium = SimulatedMedium::new();
    medium.journal().fail_release();
    let s = run_with(ScriptedInput::lines(&["3", "4", "7", "n"]), medium, NoDwell, 0);

    assert_eq!(exit_status(&s.result), 0, "declined session still exits 0");
    assert_eq!(s.journal.level(SUCCESS), Some(PinState::High));
    assert_eq!(s.journal.level(FAILURE), Some(PinState::High));

    let medium = SimulatedMedium::new();
    medium.journal().fail_release();
    let s = run_with(ScriptedInput::new(vec![]), medium, NoDwell, 0);
    assert_eq!(s.result, Err(QuizError::StreamClosed));
}

// ── Hardware media ────────────────────────────────────────────

#[test]
fn pin_pair_lifecycle_ends_with_both_pins_idle_and_returned() {
    let board = Board::default();
    let mut c = IndicatorController::new(
        board.pin_pair(),
        NoDwell,
        SUCCESS,
        FAILURE,
        Polarity::ActiveLow,
    );

    c.initialize().unwrap();
    assert!(board.is_held(SUCCESS) && board.is_held(FAILURE));
    c.pulse(Indicator::Success, Duration::ZERO).unwrap();
    c.pulse(Indicator::Failure, Duration::ZERO).unwrap();
    c.release().unwrap();

    assert_eq!(
        board.writes(SUCCESS),
        vec![PinState::High, PinState::Low, PinState::High, PinState::High]
    );
    assert_eq!(board.level(FAILURE), Some(PinState::High));
    assert!(!board.is_held(SUCCESS));
    assert!(!board.is_held(FAILURE));
    assert!(c.medium().held().is_empty());
}

#[test]
fn pin_pair_failed_initialize_returns_every_claimed_line() {
    let board = Board::default();
    board.refuse(FAILURE);
    let mut c = IndicatorController::new(
        board.pin_pair(),
        NoDwell,
        SUCCESS,
        FAILURE,
        Polarity::ActiveLow,
    );

    let err = c.initialize().unwrap_err();

    assert!(matches!(err, QuizError::ResourceUnavailable(_)));
    assert!(!c.is_active());
    assert_eq!(board.level(SUCCESS), Some(PinState::High), "claimed line idled first");
    assert!(!board.is_held(SUCCESS), "claimed line handed back");
    assert!(!board.is_held(FAILURE));
    assert!(c.medium().held().is_empty());
}

#[test]
fn pin_pair_session_leaves_pins_idle_and_returned() {
    let board = Board::default();
    let mut out = Vec::new();
    let result = run_session(
        &test_config(0),
        board.pin_pair(),
        NoDwell,
        ScriptedInput::lines(&TWO_ROUNDS),
        &mut out,
    );

    assert_eq!(exit_status(&result), 0);
    assert_eq!(board.writes(SUCCESS).iter().filter(|&&l| l == PinState::Low).count(), 1);
    assert_eq!(board.writes(FAILURE).iter().filter(|&&l| l == PinState::Low).count(), 1);
    assert_eq!(board.level(SUCCESS), Some(PinState::High));
    assert_eq!(board.level(FAILURE), Some(PinState::High));
    assert!(!board.is_held(SUCCESS) && !board.is_held(FAILURE));
}

#[test]
fn missing_chip_fails_initialize_without_claiming() {
    let dir = tempfile::tempdir().unwrap();
    let pair = cdev::open_pair(dir.path().join("gpiochip0"), [SUCCESS, FAILURE], PinState::High);
    let mut c = IndicatorController::new(pair, NoDwell, SUCCESS, FAILURE, Polarity::ActiveLow);

    assert!(matches!(c.initialize(), Err(QuizError::ResourceUnavailable(_))));
    assert!(!c.is_active());
    assert!(c.medium().held().is_empty());
    c.release().unwrap();
}

#[test]
fn hardware_backend_without_chip_exits_one_before_any_round() {
    let dir = tempfile::tempdir().unwrap();
    let config = QuizConfig {
        backend: Backend::Hardware,
        gpio_chip: dir.path().join("gpiochip0"),
        pulse_duration_ms: 0,
        ..QuizConfig::default()
    };
    let mut out = Vec::new();
    let result = run_session(
        &config,
        backend::select_medium(&config),
        NoDwell,
        ScriptedInput::lines(&["3", "4", "7", "n"]),
        &mut out,
    );

    assert!(matches!(result, Err(QuizError::ResourceUnavailable(_))));
    assert_eq!(exit_status(&result), 1);
    assert!(!String::from_utf8(out).unwrap().contains("Enter first number"));
}
