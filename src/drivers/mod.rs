//! Indicator line driver.

pub mod indicator;
