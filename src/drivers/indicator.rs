//! Success / failure indicator controller.
//!
//! Owns two logical output lines on an injected [`OutputMedium`] and
//! guarantees they are never left asserted once control leaves the
//! owning scope.
//!
//! ## Line lifecycle
//!
//! ```text
//!   Uninitialized ──initialize──▶ Deasserted ──pulse──▶ Asserted
//!         ▲                           │   ◀──(dwell)──────┘
//!         └──────────release──────────┘
//! ```
//!
//! Deasserted is both the resting state and the only state release is
//! entered from: release drives both lines Deasserted before handing the
//! medium back.
//!
//! ## Polarity
//!
//! The controller speaks in logical [`LineState`]s.  The physical
//! [`PinState`] written to the medium is derived from [`Polarity`], so an
//! active-low LED is lit by driving its line LOW.

use core::ops::{Deref, DerefMut};
use core::time::Duration;

use log::{debug, error, info, warn};

use crate::app::ports::{Dwell, LineId, MediumError, OutputMedium, PinState};
use crate::config::QuizConfig;
use crate::error::{QuizError, Result};

/// Which of the two indicators to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Success,
    Failure,
}

/// Logical state of one indicator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Uninitialized,
    Deasserted,
    Asserted,
}

/// Mapping from logical assertion to physical level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    pub fn from_active_low(active_low: bool) -> Self {
        if active_low {
            Self::ActiveLow
        } else {
            Self::ActiveHigh
        }
    }

    /// Physical level that represents `asserted`.
    pub fn level(self, asserted: bool) -> PinState {
        match (self, asserted) {
            (Self::ActiveHigh, true) | (Self::ActiveLow, false) => PinState::High,
            (Self::ActiveHigh, false) | (Self::ActiveLow, true) => PinState::Low,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Line {
    id: LineId,
    state: LineState,
}

impl Line {
    fn new(id: LineId) -> Self {
        Self {
            id,
            state: LineState::Uninitialized,
        }
    }
}

pub struct IndicatorController<M, D> {
    medium: M,
    dwell: D,
    success: Line,
    failure: Line,
    polarity: Polarity,
    active: bool,
}

impl<M: OutputMedium, D: Dwell> IndicatorController<M, D> {
    pub fn new(medium: M, dwell: D, success: LineId, failure: LineId, polarity: Polarity) -> Self {
        Self {
            medium,
            dwell,
            success: Line::new(success),
            failure: Line::new(failure),
            polarity,
            active: false,
        }
    }

    pub fn from_config(medium: M, dwell: D, config: &QuizConfig) -> Self {
        Self::new(
            medium,
            dwell,
            config.success_line(),
            config.failure_line(),
            Polarity::from_active_low(config.active_low),
        )
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure both lines as outputs and drive them Deasserted.
    ///
    /// A no-op while already active.  On failure, any line that was
    /// already claimed is handed back before returning
    /// [`QuizError::ResourceUnavailable`].
    pub fn initialize(&mut self) -> Result<()> {
        if self.active {
            debug!("indicator: initialize while active, ignored");
            return Ok(());
        }

        let ids = [self.success.id, self.failure.id];
        let mut claimed: Vec<LineId> = Vec::with_capacity(ids.len());
        let idle = self.polarity.level(false);

        for &id in &ids {
            let step = self
                .medium
                .configure_output(id)
                .and_then(|()| {
                    claimed.push(id);
                    self.medium.write(id, idle)
                });
            if let Err(e) = step {
                error!("indicator: cannot configure {}: {}", id, e);
                if !claimed.is_empty() {
                    if let Err(re) = self.medium.release(&claimed) {
                        warn!("indicator: release after failed init also failed: {}", re);
                    }
                }
                return Err(QuizError::ResourceUnavailable(e));
            }
        }

        self.success.state = LineState::Deasserted;
        self.failure.state = LineState::Deasserted;
        self.active = true;
        info!(
            "indicator: ready (success={}, failure={}, {:?})",
            self.success.id, self.failure.id, self.polarity
        );
        Ok(())
    }

    /// Assert `indicator`, hold it for `duration`, then deassert it.
    ///
    /// Blocks the calling thread for the whole dwell.  A zero duration
    /// performs both writes back to back.  The deassert is attempted even
    /// when the assert write failed or the dwell was interrupted.
    pub fn pulse(&mut self, indicator: Indicator, duration: Duration) -> Result<()> {
        if !self.active {
            return Err(QuizError::Medium(MediumError::Unavailable(
                "indicator controller not initialised",
            )));
        }

        if let Err(e) = self.set_state(indicator, true) {
            if let Err(re) = self.set_state(indicator, false) {
                warn!(
                    "indicator: deassert after failed assert on {:?} also failed: {}",
                    indicator, re
                );
            }
            return Err(QuizError::Medium(e));
        }

        let waited = if duration.is_zero() {
            Ok(())
        } else {
            self.dwell.dwell(duration)
        };

        let off = self.set_state(indicator, false);
        if waited.is_err() {
            info!("indicator: pulse on {:?} interrupted", indicator);
        }
        waited?;
        off.map_err(QuizError::Medium)
    }

    /// Drive both lines Deasserted and hand the medium back.
    ///
    /// Runs at most once per successful [`initialize`](Self::initialize);
    /// redundant calls are no-ops.  Every step is attempted even if an
    /// earlier one failed.  The first failure is logged and reported as
    /// [`QuizError::ReleaseFailure`]; callers on an unwind path drop it.
    pub fn release(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut first_err: Option<MediumError> = None;
        for indicator in [Indicator::Success, Indicator::Failure] {
            if let Err(e) = self.set_state(indicator, false) {
                error!("indicator: deassert {:?} during release failed: {}", indicator, e);
                first_err.get_or_insert(e);
            }
        }

        let ids = [self.success.id, self.failure.id];
        if let Err(e) = self.medium.release(&ids) {
            error!("indicator: medium release failed: {}", e);
            first_err.get_or_insert(e);
        }

        self.success.state = LineState::Uninitialized;
        self.failure.state = LineState::Uninitialized;

        match first_err {
            None => {
                info!("indicator: released");
                Ok(())
            }
            Some(e) => Err(QuizError::ReleaseFailure(e)),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn line_state(&self, indicator: Indicator) -> LineState {
        self.line(indicator).state
    }

    pub fn line_id(&self, indicator: Indicator) -> LineId {
        self.line(indicator).id
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }

    // ── Internal ──────────────────────────────────────────────

    fn line(&self, indicator: Indicator) -> &Line {
        match indicator {
            Indicator::Success => &self.success,
            Indicator::Failure => &self.failure,
        }
    }

    fn line_mut(&mut self, indicator: Indicator) -> &mut Line {
        match indicator {
            Indicator::Success => &mut self.success,
            Indicator::Failure => &mut self.failure,
        }
    }

    /// Write the physical level for `asserted` and record the logical
    /// state only once the write succeeded.
    fn set_state(
        &mut self,
        indicator: Indicator,
        asserted: bool,
    ) -> core::result::Result<(), MediumError> {
        let id = self.line(indicator).id;
        self.medium.write(id, self.polarity.level(asserted))?;
        self.line_mut(indicator).state = if asserted {
            LineState::Asserted
        } else {
            LineState::Deasserted
        };
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Scope guard
// ───────────────────────────────────────────────────────────────

/// Initialised controller whose release is bound to scope exit.
///
/// Dropping the guard releases the lines on every path out of the scope:
/// normal return, `?` propagation, and panic unwind.  Release errors are
/// already logged by [`IndicatorController::release`] and go no further.
pub struct IndicatorScope<'a, M: OutputMedium, D: Dwell> {
    controller: &'a mut IndicatorController<M, D>,
}

impl<'a, M: OutputMedium, D: Dwell> IndicatorScope<'a, M, D> {
    pub fn acquire(controller: &'a mut IndicatorController<M, D>) -> Result<Self> {
        controller.initialize()?;
        Ok(Self { controller })
    }
}

impl<M: OutputMedium, D: Dwell> Deref for IndicatorScope<'_, M, D> {
    type Target = IndicatorController<M, D>;

    fn deref(&self) -> &Self::Target {
        self.controller
    }
}

impl<M: OutputMedium, D: Dwell> DerefMut for IndicatorScope<'_, M, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.controller
    }
}

impl<M: OutputMedium, D: Dwell> Drop for IndicatorScope<'_, M, D> {
    fn drop(&mut self) {
        let _ = self.controller.release();
    }
}
