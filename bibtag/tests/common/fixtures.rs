// fixtures.rs: commonly used MIDs and raw tag blocks

use bibtag::types::{Mid, RawBlock};

/// MID of a single-volume item
pub const SAMPLE_MID: &str = "1101011234567890";

/// Raw blocks a reader reports for `SAMPLE_MID`
pub fn sample_blocks_bytes() -> [[u8; 4]; 4] {
    [
        [0x11, 0x01, 0x01, 0x31],
        [0x32, 0x33, 0x34, 0x35],
        [0x36, 0x37, 0x38, 0x39],
        [0x30, 0x00, 0x00, 0x00],
    ]
}

pub fn sample_blocks() -> [RawBlock; 4] {
    sample_blocks_bytes().map(|b| RawBlock::new(hex::encode_upper(b)))
}

pub fn sample_mid() -> Mid {
    Mid::new(SAMPLE_MID).unwrap()
}

/// Volume `number` of a `length`-volume set
pub fn series_mid(length: u8, number: u8) -> Mid {
    Mid::new(format!("11{:02}{:02}0000000042", length, number)).unwrap()
}

/// Blocks too short to hold a MID
pub fn truncated_blocks() -> [RawBlock; 4] {
    [
        RawBlock::new(hex::encode_upper([0x11, 0x01, 0x01, 0x31])),
        RawBlock::default(),
        RawBlock::default(),
        RawBlock::default(),
    ]
}
