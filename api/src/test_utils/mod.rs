//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! The in-memory repository keeps its state, so tests can inspect what was
//! stored after a failed use case.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
