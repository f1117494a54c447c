// bibtag/src/tag/mod.rs

use std::fmt;

use crate::types::{Afi, Mid, Uid};
use crate::{Error, Result};

pub mod read;
pub mod write;

pub use read::read_tag;
pub use write::{write_afi, write_mid};

/// One bib tag as seen during a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagRecord {
    uid: Uid,
    mid: Mid,
    afi: Option<Afi>,
    series_length: u8,
    number_in_series: u8,
}

impl TagRecord {
    /// Build a record from a decoded MID. The series fields are taken from
    /// MID characters 2..4 and 4..6; a MID where they are not numbers, or
    /// where the number exceeds the length, is rejected as malformed.
    pub fn new(uid: Uid, mid: Mid) -> Result<Self> {
        let (series_length, number_in_series) = series_of(&mid)?;
        Ok(Self {
            uid,
            mid,
            afi: None,
            series_length,
            number_in_series,
        })
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn mid(&self) -> &Mid {
        &self.mid
    }

    /// Item id part of the MID (what the circulation system knows the item by)
    pub fn item_id(&self) -> &str {
        self.mid.item_id()
    }

    pub fn afi(&self) -> Option<Afi> {
        self.afi
    }

    pub fn series_length(&self) -> u8 {
        self.series_length
    }

    pub fn number_in_series(&self) -> u8 {
        self.number_in_series
    }

    /// Two records describe the same tag when UID and MID both match.
    pub fn same_tag(&self, other: &TagRecord) -> bool {
        self.uid == other.uid && self.mid == other.mid
    }

    pub(crate) fn set_afi(&mut self, afi: Afi) {
        self.afi = Some(afi);
    }

    pub(crate) fn set_mid(&mut self, mid: Mid) -> Result<()> {
        let (series_length, number_in_series) = series_of(&mid)?;
        self.mid = mid;
        self.series_length = series_length;
        self.number_in_series = number_in_series;
        Ok(())
    }
}

impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ uid: {}, mid: {} ({}/{}) }}",
            self.uid,
            self.item_id(),
            self.number_in_series,
            self.series_length
        )
    }
}

pub(crate) fn series_of(mid: &Mid) -> Result<(u8, u8)> {
    let field = |range: std::ops::Range<usize>, name: &str| -> Result<u8> {
        let s = &mid.prefix()[range];
        s.bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| s.parse().ok())
            .flatten()
            .ok_or_else(|| Error::Decode(format!("{} {:?} in MID {} is not a number", name, s, mid)))
    };
    let length = field(2..4, "series length")?;
    let number = field(4..6, "number in series")?;
    if number > length {
        return Err(Error::Decode(format!(
            "MID {} claims item {} of a {} part series",
            mid, number, length
        )));
    }
    Ok((length, number))
}
