//! Shared test infrastructure.

pub mod harness;

pub use harness::TestHarness;
