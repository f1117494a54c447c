// bibtag/src/types.rs

use std::convert::TryFrom;
use std::str::FromStr;

use derive_more::{Display, From};

use crate::constants::{AFI_CHECKED_IN, AFI_CHECKED_OUT, MID_LEN, MID_PREFIX_LEN};
use crate::{Error, Result};

/// Tag UID as reported by the reader - Newtype Pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Uid(String);

impl Uid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Uid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Library identifier (16 characters) - Newtype Pattern
///
/// Layout: characters 0..2 are the data model tag, 2..4 the series length,
/// 4..6 the number in series and 6..16 the item id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Mid(String);

impl Mid {
    /// Validate length and character set. Only ASCII is accepted so the
    /// fixed offsets always fall on character boundaries.
    pub fn new(mid: impl Into<String>) -> Result<Self> {
        let mid = mid.into();
        if !mid.is_ascii() {
            return Err(Error::InvalidMid(format!("non-ASCII MID {:?}", mid)));
        }
        if mid.len() != MID_LEN {
            return Err(Error::InvalidMid(format!(
                "expected {} characters, got {}",
                MID_LEN,
                mid.len()
            )));
        }
        Ok(Self(mid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The six header characters (model tag and series fields).
    pub fn prefix(&self) -> &str {
        &self.0[..MID_PREFIX_LEN]
    }

    /// The ten character item id shown to library staff.
    pub fn item_id(&self) -> &str {
        &self.0[MID_PREFIX_LEN..]
    }
}

impl FromStr for Mid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mid::new(s)
    }
}

impl TryFrom<String> for Mid {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Mid::new(s)
    }
}

impl From<Mid> for String {
    fn from(mid: Mid) -> Self {
        mid.0
    }
}

/// Application Family Identifier byte
///
/// Displays as decimal, parses from decimal text (0..=255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Afi(u8);

impl Afi {
    pub const CHECKED_IN: Self = Self(AFI_CHECKED_IN);
    pub const CHECKED_OUT: Self = Self(AFI_CHECKED_OUT);

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl FromStr for Afi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::codec::afi::encode_afi(s).map(Afi)
    }
}

/// Raw content of one tag block as a string of hex pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RawBlock(String);

impl RawBlock {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(crate::utils::bytes_to_hex(bytes))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        crate::utils::parse_hex(&self.0).map_err(Error::InvalidHex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty block is what readers hand back for a failed read.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
