//! Quiz core — domain logic behind port traits.
//!
//! The round loop and prompt handling live here.  All interaction with
//! GPIO, the terminal and the clock happens through the traits in
//! [`ports`], keeping this layer fully testable without real hardware.

pub mod input;
pub mod ports;
pub mod quiz;
