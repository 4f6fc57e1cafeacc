//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one layer against the
//! mock store and a manual clock.  Nothing touches the filesystem.

mod engine_tests;
mod runtime_tests;
