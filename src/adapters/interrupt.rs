//! User-interrupt plumbing.
//!
//! [`CancelSignal`] is a one-way latch raised from the Ctrl+C handler.
//! [`InterruptibleDwell`] waits on it instead of sleeping, so a pulse in
//! progress ends as soon as the user interrupts and the indicator scope
//! can unwind to release.
//!
//! [`install_handler`] wires both to Ctrl+C.  The handler runs on the
//! `ctrlc` crate's own thread and only raises the latch and posts a
//! cancel marker to the terminal channel; indicator lines are never
//! touched from there.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, info};

use crate::app::ports::{Cancelled, Dwell, InputLine};

#[derive(Debug, Default)]
struct Latch {
    raised: Mutex<bool>,
    cond: Condvar,
}

/// Cloneable handle onto a shared cancellation latch.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    latch: Arc<Latch>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the latch and wake every waiter.  Idempotent.
    pub fn raise(&self) {
        let mut raised = self
            .latch
            .raised
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *raised = true;
        self.latch.cond.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        *self
            .latch
            .raised
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for up to `timeout`.  Returns `true` if the latch was raised
    /// before the timeout elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self
            .latch
            .raised
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (raised, _) = self
            .latch
            .cond
            .wait_timeout_while(guard, timeout, |raised| !*raised)
            .unwrap_or_else(PoisonError::into_inner);
        *raised
    }
}

/// Pulse dwell that ends early when the [`CancelSignal`] is raised.
#[derive(Debug, Clone)]
pub struct InterruptibleDwell {
    signal: CancelSignal,
}

impl InterruptibleDwell {
    pub fn new(signal: CancelSignal) -> Self {
        Self { signal }
    }
}

impl Dwell for InterruptibleDwell {
    fn dwell(&mut self, duration: Duration) -> Result<(), Cancelled> {
        if self.signal.wait_timeout(duration) {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Route Ctrl+C to `signal` and to the terminal line channel.
///
/// Can only be installed once per process.
pub fn install_handler(
    signal: CancelSignal,
    lines: Sender<InputLine>,
) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        info!("interrupt received");
        signal.raise();
        if lines.send(InputLine::Cancelled).is_err() {
            debug!("interrupt: terminal channel already closed");
        }
    })
}
