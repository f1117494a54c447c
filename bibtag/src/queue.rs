// bibtag/src/queue.rs
//! Outstanding write requests.
//!
//! Any thread may push; the poll worker drains the whole queue once per
//! cycle. Requests pushed while a drained batch is being processed wait for
//! the next cycle.

use std::collections::VecDeque;
use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::types::{Afi, Mid, Uid};

/// What a pending request writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteKind {
    Afi(Afi),
    Mid(Mid),
}

/// A write addressed to one tag, applied on the next poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub uid: Uid,
    pub kind: WriteKind,
}

impl PendingWrite {
    pub fn afi(uid: Uid, afi: Afi) -> Self {
        Self {
            uid,
            kind: WriteKind::Afi(afi),
        }
    }

    pub fn mid(uid: Uid, mid: Mid) -> Self {
        Self {
            uid,
            kind: WriteKind::Mid(mid),
        }
    }

    /// Same tag and same field.
    fn same_target(&self, other: &PendingWrite) -> bool {
        self.uid == other.uid && mem::discriminant(&self.kind) == mem::discriminant(&other.kind)
    }
}

/// FIFO of pending writes shared between callers and the poll worker.
#[derive(Debug, Default)]
pub struct PendingWriteQueue {
    inner: Mutex<VecDeque<PendingWrite>>,
}

impl PendingWriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PendingWrite>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, write: PendingWrite) {
        self.lock().push_back(write);
    }

    /// Take every queued request, leaving the queue empty.
    pub fn drain(&self) -> Vec<PendingWrite> {
        mem::take(&mut *self.lock()).into()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// One write to send, standing for every request it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoalescedWrite {
    pub write: PendingWrite,
    /// Number of queued requests folded into `write` (at least 1)
    pub requests: usize,
}

/// Collapse requests aimed at the same tag and field. The latest value wins
/// and keeps the position of the first request for that target.
pub fn coalesce(writes: Vec<PendingWrite>) -> Vec<CoalescedWrite> {
    let mut out: Vec<CoalescedWrite> = Vec::with_capacity(writes.len());
    for write in writes {
        match out.iter_mut().find(|c| c.write.same_target(&write)) {
            Some(earlier) => {
                debug!(
                    "write {:?} to {} superseded by {:?}",
                    earlier.write.kind, earlier.write.uid, write.kind
                );
                earlier.write = write;
                earlier.requests += 1;
            }
            None => out.push(CoalescedWrite { write, requests: 1 }),
        }
    }
    out
}
