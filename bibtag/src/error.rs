// bibtag/src/error.rs

use thiserror::Error;

use crate::types::Uid;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("reader not connected")]
    NotConnected,

    #[error("tag {uid} did not answer read of block {block}")]
    TagUnreadable { uid: Uid, block: u8 },

    #[error("malformed tag data: {0}")]
    Decode(String),

    #[error("invalid MID: {0}")]
    InvalidMid(String),

    #[error("invalid AFI: {0}")]
    InvalidAfi(String),

    #[error("tag {0} not found on reader")]
    NotFound(Uid),

    #[error("block index out of range: {0}")]
    InvalidBlockIndex(u8),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("no transport configured")]
    MissingTransport,

    #[error("operation not allowed while the poll worker is active")]
    Busy,

    #[error("poll worker terminated abnormally")]
    WorkerLost,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures that invalidate the whole poll cycle rather than a
    /// single tag.
    pub fn aborts_tick(&self) -> bool {
        !matches!(self, Error::TagUnreadable { .. } | Error::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
