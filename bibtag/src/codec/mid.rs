// bibtag/src/codec/mid.rs
//! MID <-> block codec.
//!
//! Deployed tags store the 16 character MID in four 4-byte blocks:
//!
//! ```text
//! block0: [lead + 6, series_len, series_num, d0 + 48]
//! block1: [d1 + 48, d2 + 48, d3 + 48, d4 + 48]
//! block2: [d5 + 48, d6 + 48, d7 + 48, d8 + 48]
//! block3: [d9 + 48, 0x00, 0x00, 0x00]
//! ```
//!
//! Read back as hex, the first six characters are the MID header and every
//! item digit shows up as the second character of a `3x` pair. Decoding keeps
//! the header and every second character of the following 20 characters.
//! The format is fixed by tags already in circulation.

use crate::constants::{
    BLOCK_COUNT, MID_DIGIT_OFFSET, MID_LEAD_MAX, MID_LEAD_MIN, MID_LEAD_OFFSET, MID_LEN,
    MID_PREFIX_LEN, MID_SERIES_MAX, MID_WINDOW_END, MID_WINDOW_START,
};
use crate::types::{Mid, RawBlock};
use crate::{Error, Result};

/// Decode the MID from the blocks read off a tag (block 0 first).
pub fn decode_mid(blocks: &[RawBlock]) -> Result<Mid> {
    let raw: String = blocks.iter().map(RawBlock::as_str).collect();
    decode_mid_raw(&raw)
}

/// Decode the MID from the concatenated block string.
pub fn decode_mid_raw(raw: &str) -> Result<Mid> {
    if !raw.is_ascii() {
        return Err(Error::Decode(format!("non-ASCII block data {:?}", raw)));
    }
    if raw.len() < MID_WINDOW_END {
        return Err(Error::Decode(format!(
            "block data too short: expected at least {} characters, got {}",
            MID_WINDOW_END,
            raw.len()
        )));
    }

    let window = &raw.as_bytes()[MID_WINDOW_START..MID_WINDOW_END];
    let mut mid = String::with_capacity(MID_LEN);
    mid.push_str(&raw[..MID_PREFIX_LEN]);
    mid.extend(
        window
            .chunks(2)
            .filter_map(|pair| pair.get(1))
            .map(|&b| b as char),
    );

    Mid::new(mid).map_err(|e| Error::Decode(e.to_string()))
}

/// Encode a MID into the four raw blocks to write to a tag.
///
/// Every character must be a decimal digit. The header pairs are stored as
/// plain bytes, so only values that read back as the same digits are
/// accepted: a leading pair of 10..=19 and series fields of 00..=09.
pub fn encode_mid(mid: &Mid) -> Result<[RawBlock; BLOCK_COUNT as usize]> {
    let digits = mid_digits(mid)?;
    let pair = |i: usize| digits[i] * 10 + digits[i + 1];

    let lead = pair(0);
    if !(MID_LEAD_MIN..=MID_LEAD_MAX).contains(&lead) {
        return Err(Error::InvalidMid(format!(
            "leading pair {:02} cannot be stored, expected {}..={}",
            lead, MID_LEAD_MIN, MID_LEAD_MAX
        )));
    }

    let series_length = pair(2);
    let number_in_series = pair(4);
    for (name, value) in [
        ("series length", series_length),
        ("number in series", number_in_series),
    ] {
        if value > MID_SERIES_MAX {
            return Err(Error::InvalidMid(format!(
                "{} {:02} cannot be stored, maximum is {:02}",
                name, value, MID_SERIES_MAX
            )));
        }
    }

    let item: Vec<u8> = digits[MID_PREFIX_LEN..]
        .iter()
        .map(|d| d + MID_DIGIT_OFFSET)
        .collect();

    let blocks = [
        [lead + MID_LEAD_OFFSET, series_length, number_in_series, item[0]],
        [item[1], item[2], item[3], item[4]],
        [item[5], item[6], item[7], item[8]],
        [item[9], 0x00, 0x00, 0x00],
    ];
    Ok(blocks.map(|b| RawBlock::from_bytes(&b)))
}

fn mid_digits(mid: &Mid) -> Result<[u8; MID_LEN]> {
    let mut out = [0u8; MID_LEN];
    for (slot, c) in out.iter_mut().zip(mid.as_str().chars()) {
        *slot = c
            .to_digit(10)
            .ok_or_else(|| Error::InvalidMid(format!("non-digit {:?} in {}", c, mid)))?
            as u8;
    }
    Ok(out)
}
