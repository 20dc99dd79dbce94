//! Output medium over two `embedded-hal` output pins.
//!
//! Pins are opened lazily: `configure_output` asks the opener for the pin
//! behind a line and keeps it, `release` drops it.  For pin types whose
//! `Drop` gives the line back to the kernel (the GPIO character device
//! pins built in [`cdev`](crate::adapters::cdev)), holding the pin is the
//! claim.
//!
//! A failed `configure_output` leaves nothing held, so a half-finished
//! initialize never strands a line.

use embedded_hal::digital::{Error as _, OutputPin};
use log::{debug, warn};

use crate::app::ports::{LineId, MediumError, OutputMedium, PinState};

/// Opens the pin behind one line.
pub type PinOpener<P> = Box<dyn FnMut(LineId) -> Result<P, MediumError>>;

pub struct PinPair<P> {
    lines: [LineId; 2],
    pins: [Option<P>; 2],
    open: PinOpener<P>,
}

impl<P: OutputPin> PinPair<P> {
    pub fn new(
        lines: [LineId; 2],
        open: impl FnMut(LineId) -> Result<P, MediumError> + 'static,
    ) -> Self {
        Self {
            lines,
            pins: [None, None],
            open: Box::new(open),
        }
    }

    /// Lines whose pin is currently held.
    pub fn held(&self) -> Vec<LineId> {
        self.lines
            .iter()
            .zip(&self.pins)
            .filter(|(_, pin)| pin.is_some())
            .map(|(&id, _)| id)
            .collect()
    }

    fn index(&self, line: LineId) -> Result<usize, MediumError> {
        self.lines
            .iter()
            .position(|&id| id == line)
            .ok_or(MediumError::UnknownLine(line))
    }
}

impl<P: OutputPin> OutputMedium for PinPair<P> {
    fn configure_output(&mut self, line: LineId) -> Result<(), MediumError> {
        let idx = self.index(line)?;
        if self.pins[idx].is_some() {
            debug!("pin {}: already held", line);
            return Ok(());
        }
        self.pins[idx] = Some((self.open)(line)?);
        debug!("pin {}: opened as output", line);
        Ok(())
    }

    fn write(&mut self, line: LineId, level: PinState) -> Result<(), MediumError> {
        let idx = self.index(line)?;
        let Some(pin) = self.pins[idx].as_mut() else {
            return Err(MediumError::UnknownLine(line));
        };
        pin.set_state(level).map_err(|e| {
            warn!("pin {}: write failed: {:?}", line, e.kind());
            MediumError::Unavailable("output pin write failed")
        })
    }

    fn release(&mut self, lines: &[LineId]) -> Result<(), MediumError> {
        for &line in lines {
            let idx = self.index(line)?;
            if self.pins[idx].take().is_some() {
                debug!("pin {}: released", line);
            }
        }
        Ok(())
    }
}
