// bibtag/src/codec/mod.rs
//! On-tag data codec.
//!
//! Pure functions converting between the values the library works with (MID,
//! AFI) and what is physically stored on a bib tag. Nothing in here touches a
//! transport.

pub mod afi;
pub mod mid;

pub use afi::{decode_afi, encode_afi};
pub use mid::{decode_mid, decode_mid_raw, encode_mid};
