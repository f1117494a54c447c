// bibtag/src/reconcile.rs
//! Arrival/departure detection between two poll cycles.

use crate::tag::TagRecord;

/// Changes between the previous and the current set of visible tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub arrived: Vec<TagRecord>,
    pub departed: Vec<TagRecord>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.arrived.is_empty() && self.departed.is_empty()
    }
}

/// Compare two tag sets. A tag is unchanged when a record with the same UID
/// and MID exists on both sides; slot order is irrelevant.
///
/// Pairwise scan; a reader field holds a few dozen tags at most.
pub fn diff(previous: &[TagRecord], current: &[TagRecord]) -> Diff {
    Diff {
        arrived: current
            .iter()
            .filter(|t| !contains(previous, t))
            .cloned()
            .collect(),
        departed: previous
            .iter()
            .filter(|t| !contains(current, t))
            .cloned()
            .collect(),
    }
}

fn contains(set: &[TagRecord], tag: &TagRecord) -> bool {
    set.iter().any(|t| t.same_tag(tag))
}
