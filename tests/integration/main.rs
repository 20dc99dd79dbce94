//! Integration test driver for `tests/integration/`.
//!
//! Each `mod` below maps to a file that exercises the quiz against the
//! simulated medium and scripted terminal input.  All tests run on the
//! host with no GPIO required.

mod lifecycle_tests;
