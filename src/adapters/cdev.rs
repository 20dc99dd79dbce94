//! Linux GPIO character device medium.
//!
//! Each indicator line is requested from the chip (`/dev/gpiochipN`) as an
//! output through `gpiocdev-embedded-hal` and driven through the
//! [`PinPair`] medium.  Line identities are chip offsets, which on the
//! Raspberry Pi's main chip are the BCM GPIO numbers.
//!
//! The kernel holds a line for as long as its request is open, so a line
//! is claimed when its pin is opened and handed back when the pin drops.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::adapters::pin_pair::PinPair;
use crate::app::ports::{LineId, MediumError, PinState};

/// One requested output line on a GPIO chip.
pub type ChipPin = gpiocdev_embedded_hal::OutputPin;

/// True if `chip` exists and can be opened for reading and writing.
pub fn probe(chip: &Path) -> bool {
    OpenOptions::new().read(true).write(true).open(chip).is_ok()
}

/// Medium over `lines` on `chip`.
///
/// Lines are requested at `idle` so that claiming one never lights it.
pub fn open_pair(
    chip: impl Into<PathBuf>,
    lines: [LineId; 2],
    idle: PinState,
) -> PinPair<ChipPin> {
    let chip = chip.into();
    PinPair::new(lines, move |line| match ChipPin::new(&chip, line.0, idle) {
        Ok(pin) => {
            info!("cdev: {} requested on {}", line, chip.display());
            Ok(pin)
        }
        Err(e) => {
            error!("cdev: cannot request {} on {}: {}", line, chip.display(), e);
            Err(MediumError::Unavailable("GPIO line request failed"))
        }
    })
}
