//! Quiz configuration.
//!
//! Line identities, polarity, pulse length and backend selection.  Values
//! default to the wiring in [`pins`](crate::pins) and can be overridden
//! by a `mathquiz.json` file in the working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::LineId;
use crate::error::QuizError;
use crate::pins;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "mathquiz.json";

/// Longest pulse accepted from configuration.
const MAX_PULSE_MS: u64 = 60_000;

/// Which output medium drives the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Use the GPIO chip if it is accessible, otherwise simulate.
    Auto,
    /// Linux GPIO character device; fail if unavailable.
    Hardware,
    /// In-memory simulation that logs every write.
    Simulation,
}

/// Core quiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// GPIO pulsed on a correct answer.
    pub success_line: u32,
    /// GPIO pulsed on a wrong answer.
    pub failure_line: u32,
    /// LOW lights the LED when true.
    pub active_low: bool,
    /// How long an indicator stays lit (milliseconds).
    pub pulse_duration_ms: u64,
    pub backend: Backend,
    /// GPIO chip device the indicator lines are requested from.
    pub gpio_chip: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            success_line: pins::SUCCESS_LINE_GPIO,
            failure_line: pins::FAILURE_LINE_GPIO,
            active_low: pins::INDICATORS_ACTIVE_LOW,
            pulse_duration_ms: pins::PULSE_DURATION_MS,
            backend: Backend::Auto,
            gpio_chip: PathBuf::from(pins::GPIO_CHIP_PATH),
        }
    }
}

impl QuizConfig {
    pub fn success_line(&self) -> LineId {
        LineId(self.success_line)
    }

    pub fn failure_line(&self) -> LineId {
        LineId(self.failure_line)
    }

    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_duration_ms)
    }

    /// Reject values that would make the indicators ambiguous or hang the
    /// quiz.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.success_line == self.failure_line {
            return Err(QuizError::Config(
                "success and failure indicators must use different lines",
            ));
        }
        if self.pulse_duration_ms > MAX_PULSE_MS {
            return Err(QuizError::Config("pulse_duration_ms must not exceed 60000"));
        }
        Ok(())
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults.  An unreadable, malformed or
    /// invalid file also yields the defaults, with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(e) => {
                warn!("Config {} unreadable ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&text) {
            Ok(cfg) => match cfg.validate() {
                Ok(()) => {
                    info!("Config loaded from {}", path.display());
                    cfg
                }
                Err(e) => {
                    warn!("Config {} rejected ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Config {} malformed ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
