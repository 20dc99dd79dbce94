//! MathQuiz library.
//!
//! Exposes the quiz core, the indicator controller and every adapter for
//! integration testing.  The binary in `main.rs` only wires them to the
//! real terminal, Ctrl+C and GPIO.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
