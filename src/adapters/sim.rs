//! In-memory simulation of the indicator output medium.
//!
//! Used when no GPIO is present (development machines, CI) and by every
//! test.  Each operation is appended to a shared [`Journal`] and echoed
//! to the log with a `[SIM]` prefix.  The journal also carries
//! fault-injection switches so tests can fail configure, write or
//! release at a chosen point.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::info;

use crate::app::ports::{LineId, MediumError, OutputMedium, PinState};

/// One recorded interaction with the medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediumEvent {
    Configured(LineId),
    Write(LineId, PinState),
    Released(Vec<LineId>),
}

#[derive(Debug, Default)]
struct JournalState {
    events: Vec<MediumEvent>,
    levels: HashMap<LineId, PinState>,
    configured: HashSet<LineId>,
    released: bool,
    fail_configure: Option<LineId>,
    /// Writes still allowed before the next one fails (once).
    writes_before_fault: Option<usize>,
    fail_release: bool,
}

/// Shared view of a [`SimulatedMedium`]'s history and fault switches.
///
/// Cloning the handle shares the same underlying journal, so a test can
/// keep one while the controller owns the medium.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    inner: Rc<RefCell<JournalState>>,
}

impl Journal {
    pub fn events(&self) -> Vec<MediumEvent> {
        self.inner.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().events.clear();
    }

    /// Last level written to `line`, if any.
    pub fn level(&self, line: LineId) -> Option<PinState> {
        self.inner.borrow().levels.get(&line).copied()
    }

    /// Every write to `line`, in order.
    pub fn writes_to(&self, line: LineId) -> Vec<PinState> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                MediumEvent::Write(l, level) if *l == line => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// True once the medium has been released and nothing is configured.
    pub fn is_released(&self) -> bool {
        let s = self.inner.borrow();
        s.released && s.configured.is_empty()
    }

    pub fn is_configured(&self, line: LineId) -> bool {
        self.inner.borrow().configured.contains(&line)
    }

    // ── Fault injection ───────────────────────────────────────

    /// Make `configure_output(line)` fail.
    pub fn fail_configure(&self, line: LineId) {
        self.inner.borrow_mut().fail_configure = Some(line);
    }

    /// Let `n` more writes succeed, then fail the one after that.  Later
    /// writes succeed again, modelling a transient fault.
    pub fn fail_write_after(&self, n: usize) {
        self.inner.borrow_mut().writes_before_fault = Some(n);
    }

    /// Make the next `release` fail (lines are still written idle first).
    pub fn fail_release(&self) {
        self.inner.borrow_mut().fail_release = true;
    }
}

/// Output medium that only records what it is told.
#[derive(Debug, Default)]
pub struct SimulatedMedium {
    journal: Journal,
}

impl SimulatedMedium {
    pub fn new() -> Self {
        info!("[SIM] simulated GPIO medium ready");
        Self::default()
    }

    /// Handle onto this medium's journal.
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl OutputMedium for SimulatedMedium {
    fn configure_output(&mut self, line: LineId) -> Result<(), MediumError> {
        let mut s = self.journal.inner.borrow_mut();
        if s.fail_configure == Some(line) {
            return Err(MediumError::Injected("configure"));
        }
        s.configured.insert(line);
        s.released = false;
        s.events.push(MediumEvent::Configured(line));
        info!("[SIM] {} configured as output", line);
        Ok(())
    }

    fn write(&mut self, line: LineId, level: PinState) -> Result<(), MediumError> {
        let mut s = self.journal.inner.borrow_mut();
        if !s.configured.contains(&line) {
            return Err(MediumError::UnknownLine(line));
        }
        match s.writes_before_fault {
            Some(0) => {
                s.writes_before_fault = None;
                return Err(MediumError::Injected("write"));
            }
            Some(n) => s.writes_before_fault = Some(n - 1),
            None => {}
        }
        s.levels.insert(line, level);
        s.events.push(MediumEvent::Write(line, level));
        let label = match level {
            PinState::High => "HIGH",
            PinState::Low => "LOW",
        };
        info!("[SIM] {} → {}", line, label);
        Ok(())
    }

    fn release(&mut self, lines: &[LineId]) -> Result<(), MediumError> {
        let mut s = self.journal.inner.borrow_mut();
        if s.fail_release {
            s.fail_release = false;
            return Err(MediumError::Injected("release"));
        }
        for line in lines {
            s.configured.remove(line);
        }
        s.released = true;
        s.events.push(MediumEvent::Released(lines.to_vec()));
        info!("[SIM] GPIO cleanup complete");
        Ok(())
    }
}
