// bibtag/src/codec/afi.rs

use std::num::IntErrorKind;

use crate::{Error, Result};

/// Parse a decimal AFI value (`"7"`, `"194"`, ...) into the byte written to
/// the tag. Surrounding whitespace is ignored.
pub fn encode_afi(value: &str) -> Result<u8> {
    let trimmed = value.trim();
    let n: u32 = trimmed.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => {
            Error::InvalidAfi(format!("{} does not fit in one byte", trimmed))
        }
        _ => Error::InvalidAfi(format!("{:?} is not a decimal number", value)),
    })?;
    u8::try_from(n).map_err(|_| Error::InvalidAfi(format!("{} does not fit in one byte", n)))
}

/// Render an AFI byte the way it is reported to listeners.
pub fn decode_afi(byte: u8) -> String {
    byte.to_string()
}
