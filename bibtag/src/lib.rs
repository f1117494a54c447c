// bibtag/src/lib.rs

//! bibtag
//!
//! Poll loop and on-tag codec for ISO-15693 library bib tags: a worker
//! thread inventories the reader field, reports tags arriving and leaving,
//! and applies queued AFI/MID writes between cycles.
#![warn(missing_docs)]

pub mod codec;
pub mod constants;
pub mod error;
pub mod listener;
pub mod prelude;
pub mod queue;
pub mod reader;
pub mod reconcile;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
