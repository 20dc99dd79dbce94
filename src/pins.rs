//! Default indicator line assignments (BCM GPIO numbering).
//!
//! Single source of truth for the wiring the quiz ships with.  The values
//! here only seed [`QuizConfig::default`](crate::config::QuizConfig); the
//! controller itself always takes line identities from configuration.
//!
//! ```text
//!   Board pin 2  (5V)      → LED anodes (through 220 Ω)
//!   Board pin 6  (GND)     → ground
//!   Board pin 33 (GPIO 13) → green LED, success
//!   Board pin 35 (GPIO 19) → red LED, failure
//! ```

// ---------------------------------------------------------------------------
// Indicator outputs (active-low: driving the line LOW lights the LED)
// ---------------------------------------------------------------------------

/// Green LED, lit when the answer is correct.  Board pin 33.
pub const SUCCESS_LINE_GPIO: u32 = 13;
/// Red LED, lit when the answer is wrong.  Board pin 35.
pub const FAILURE_LINE_GPIO: u32 = 19;

/// Both LEDs are wired active-low.
pub const INDICATORS_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// How long an indicator stays lit after an answer.
pub const PULSE_DURATION_MS: u64 = 5_000;

// ---------------------------------------------------------------------------
// Linux GPIO character device
// ---------------------------------------------------------------------------

/// GPIO chip carrying the header pins.  Line offsets on it are BCM numbers.
pub const GPIO_CHIP_PATH: &str = "/dev/gpiochip0";
