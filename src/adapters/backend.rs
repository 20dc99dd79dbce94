//! Output medium selection.
//!
//! Resolves [`Backend`] from configuration into a concrete medium.
//! `Auto` probes the GPIO chip device and falls back to simulation when
//! it is missing or not accessible (development machines, containers).

use log::{info, warn};

use crate::adapters::cdev;
use crate::adapters::sim::SimulatedMedium;
use crate::app::ports::OutputMedium;
use crate::config::{Backend, QuizConfig};
use crate::drivers::indicator::Polarity;

/// Concrete backend chosen after probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Chip,
    Simulation,
}

/// Decide which medium `config` asks for.
///
/// `Hardware` always resolves to the chip; if it is unusable the
/// controller's initialize reports it as `ResourceUnavailable`.
pub fn resolve(config: &QuizConfig) -> Resolved {
    match config.backend {
        Backend::Hardware => Resolved::Chip,
        Backend::Simulation => Resolved::Simulation,
        Backend::Auto => {
            if cdev::probe(&config.gpio_chip) {
                Resolved::Chip
            } else {
                warn!(
                    "GPIO not found at {}. Running in simulation mode.",
                    config.gpio_chip.display()
                );
                Resolved::Simulation
            }
        }
    }
}

/// Build the medium for `config`.
pub fn select_medium(config: &QuizConfig) -> Box<dyn OutputMedium> {
    match resolve(config) {
        Resolved::Chip => {
            info!("backend: GPIO chip {}", config.gpio_chip.display());
            let idle = Polarity::from_active_low(config.active_low).level(false);
            Box::new(cdev::open_pair(
                config.gpio_chip.clone(),
                [config.success_line(), config.failure_line()],
                idle,
            ))
        }
        Resolved::Simulation => {
            info!("backend: simulation");
            Box::new(SimulatedMedium::new())
        }
    }
}
