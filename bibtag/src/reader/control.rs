// bibtag/src/reader/control.rs
//! State shared between the poll worker and the threads controlling it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::codec;
use crate::queue::{PendingWrite, PendingWriteQueue};
use crate::tag;
use crate::types::{Afi, Mid, Uid};
use crate::{Error, Result};

/// Lifecycle of a `TagReader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderState {
    /// Not started, or stopped and the worker has exited
    #[default]
    Idle,
    /// Opening the transport
    Connecting,
    /// Worker is polling
    Running,
    /// Stop requested, worker finishing its current cycle
    Stopping,
}

#[derive(Debug, Default)]
pub(crate) struct Shared {
    state: Mutex<ReaderState>,
    stop: AtomicBool,
    snapshot: AtomicBool,
    queue: PendingWriteQueue,
}

impl Shared {
    fn state_guard(&self) -> MutexGuard<'_, ReaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state(&self) -> ReaderState {
        *self.state_guard()
    }

    pub(crate) fn set_state(&self, state: ReaderState) {
        *self.state_guard() = state;
    }

    /// Move from `from` to `to`; returns false if the state was something else.
    pub(crate) fn transition(&self, from: ReaderState, to: ReaderState) -> bool {
        let mut guard = self.state_guard();
        if *guard == from {
            *guard = to;
            true
        } else {
            false
        }
    }

    /// Raise the stop flag; `Running` and `Connecting` become `Stopping`.
    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        let mut state = self.state_guard();
        if matches!(*state, ReaderState::Running | ReaderState::Connecting) {
            info!("stop requested");
            *state = ReaderState::Stopping;
        }
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    pub(crate) fn clear_stop(&self) {
        self.stop.store(false, Ordering::Release);
    }

    pub(crate) fn request_snapshot(&self) {
        self.snapshot.store(true, Ordering::Release);
    }

    pub(crate) fn take_snapshot_request(&self) -> bool {
        self.snapshot.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn push_write(&self, write: PendingWrite) {
        self.queue.push(write);
    }

    pub(crate) fn pending_writes(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn drain_writes(&self) -> Vec<PendingWrite> {
        self.queue.drain()
    }
}

/// Cloneable control surface of a running reader. Safe to use from any
/// thread; no call blocks for longer than a short lock.
#[derive(Debug, Clone, Default)]
pub struct ReaderHandle {
    pub(crate) shared: Arc<Shared>,
}

impl ReaderHandle {
    pub fn state(&self) -> ReaderState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == ReaderState::Running
    }

    /// Ask the worker to stop after its current poll cycle.
    pub fn stop(&self) {
        self.shared.request_stop();
    }

    /// Ask for the full list of tags in the field at the end of the next
    /// poll cycle (`TagListener::on_tags_snapshot`).
    pub fn request_snapshot(&self) {
        self.shared.request_snapshot();
    }

    /// Queue an AFI write. `afi` is a decimal byte value; invalid values are
    /// rejected here and never queued.
    ///
    /// Requests for the same tag queued before the next cycle are merged and
    /// only the last value is written, but each request still gets its own
    /// `on_afi_write_result` carrying the outcome of that write.
    pub fn enqueue_set_afi(&self, uid: impl Into<Uid>, afi: &str) -> Result<()> {
        let afi: Afi = afi.parse()?;
        self.shared.push_write(PendingWrite::afi(uid.into(), afi));
        Ok(())
    }

    /// Queue a MID write. The MID must be encodable and carry a valid series
    /// header; anything else is rejected here and never queued.
    /// Merged like AFI requests.
    pub fn enqueue_set_mid(&self, uid: impl Into<Uid>, mid: &str) -> Result<()> {
        let mid = Mid::new(mid)?;
        codec::encode_mid(&mid)?;
        tag::series_of(&mid).map_err(|e| Error::InvalidMid(e.to_string()))?;
        self.shared.push_write(PendingWrite::mid(uid.into(), mid));
        Ok(())
    }

    /// Number of writes waiting for the next poll cycle.
    pub fn pending_writes(&self) -> usize {
        self.shared.pending_writes()
    }
}
