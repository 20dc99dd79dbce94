//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements    | Connects to                  |
//! |-------------|---------------|------------------------------|
//! | `pin_pair`  | OutputMedium  | any two embedded-hal pins    |
//! | `cdev`      | (`PinPair`)   | Linux `/dev/gpiochipN`       |
//! | `sim`       | OutputMedium  | in-memory journal + log      |
//! | `terminal`  | LineSource    | stdin reader thread          |
//! | `interrupt` | Dwell         | Ctrl+C cancel latch          |
//!
//! [`backend`] picks the output medium at startup.

pub mod backend;
pub mod cdev;
pub mod interrupt;
pub mod pin_pair;
pub mod sim;
pub mod terminal;
