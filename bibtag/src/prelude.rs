// bibtag/src/prelude.rs

pub use crate::listener::{NoopListener, TagListener};
pub use crate::reader::{ReaderBuilder, ReaderConfig, ReaderHandle, ReaderState, TagReader};
pub use crate::tag::TagRecord;
pub use crate::transport::Transport;
pub use crate::{Afi, Error, Mid, RawBlock, Result, Uid};

// Re-export small utilities for convenience
pub use crate::codec::{decode_mid, encode_afi, encode_mid};
pub use crate::utils::{bytes_to_hex, default_poll_interval, ms, parse_hex};
