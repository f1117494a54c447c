// Shared helpers for the integration tests in `tests/`.
#![allow(dead_code)]

pub mod fixtures;

pub use helpers::*;
