// bibtag/src/constants.rs
//! Tag layout and codec constants used across the crate

/// Number of data blocks holding the MID
pub const BLOCK_COUNT: u8 = 4;

/// Bytes per data block on deployed bib tags
pub const BLOCK_SIZE: usize = 4;

/// Length of a decoded MID in characters
pub const MID_LEN: usize = 16;

/// Leading MID characters copied verbatim from the raw block string
pub const MID_PREFIX_LEN: usize = 6;

/// First raw character of the window holding the packed item id
pub const MID_WINDOW_START: usize = 6;

/// End (exclusive) of the raw window holding the packed item id
pub const MID_WINDOW_END: usize = 26;

/// Offset added to the leading MID pair before it is stored as a byte
pub const MID_LEAD_OFFSET: u8 = 6;

/// Offset added to each item digit before it is stored (ASCII '0')
pub const MID_DIGIT_OFFSET: u8 = 48;

/// Smallest leading pair whose stored byte reads back as the same digits
pub const MID_LEAD_MIN: u8 = 10;

/// Largest leading pair whose stored byte reads back as the same digits
pub const MID_LEAD_MAX: u8 = 19;

/// Largest series field whose stored byte reads back as the same digits
pub const MID_SERIES_MAX: u8 = 9;

/// AFI written when an item is returned to the library
pub const AFI_CHECKED_IN: u8 = 0x07;

/// AFI written when an item is lent out
pub const AFI_CHECKED_OUT: u8 = 0xC2;

/// Default pause between two poll cycles
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Name given to the poll worker thread
pub const POLL_THREAD_NAME: &str = "bibtag-poll";
