//! Small helpers shared by the codec, the transports and the poll loop.
//!
//! Hex conversion for raw block strings and duration helpers for the poll
//! interval.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
