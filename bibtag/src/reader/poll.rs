// bibtag/src/reader/poll.rs

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use log::{debug, info, trace, warn};

use crate::listener::TagListener;
use crate::queue::{self, CoalescedWrite, WriteKind};
use crate::reader::config::ReaderConfig;
use crate::reader::control::{ReaderState, Shared};
use crate::reconcile;
use crate::tag::{self, TagRecord};
use crate::transport::Transport;
use crate::Result;

/// Worker-side state: the transport, the listener and the tags seen in the
/// last successful poll cycle. Owned by exactly one thread at a time.
pub(crate) struct PollLoop {
    pub(crate) transport: Box<dyn Transport>,
    listener: Box<dyn TagListener>,
    shared: Arc<Shared>,
    config: ReaderConfig,
    known: Vec<TagRecord>,
}

impl PollLoop {
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        listener: Box<dyn TagListener>,
        shared: Arc<Shared>,
        config: ReaderConfig,
    ) -> Self {
        Self {
            transport,
            listener,
            shared,
            config,
            known: Vec::new(),
        }
    }

    /// Poll until a stop is requested, then hand the loop back.
    ///
    /// A panic inside a cycle (a listener callback, a transport) is logged
    /// and the loop carries on with the next cycle.
    pub(crate) fn run(mut self) -> Self {
        let _idle = IdleOnExit(Arc::clone(&self.shared));
        info!("poll worker started");
        while !self.shared.stop_requested() {
            // Errors are logged by tick; the next cycle retries from the
            // same baseline.
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| self.tick())) {
                warn!("poll cycle panicked: {}", panic_message(payload.as_ref()));
            }
            if self.shared.stop_requested() {
                break;
            }
            thread::sleep(self.config.poll_interval);
        }

        if self.config.disconnect_on_stop {
            match self.transport.disconnect() {
                Ok(()) => info!("reader disconnected"),
                Err(e) => warn!("disconnect failed: {}", e),
            }
        }
        info!("poll worker stopped");
        self
    }

    /// One poll cycle. A transport failure aborts the cycle and leaves the
    /// known tags and the pending writes untouched.
    pub(crate) fn tick(&mut self) -> Result<()> {
        self.listener.on_poll_cycle_started();

        let mut current = match self.read_field() {
            Ok(tags) => tags,
            Err(e) => {
                warn!("poll cycle aborted: {}", e);
                return Err(e);
            }
        };

        let changes = reconcile::diff(&self.known, &current);
        for tag in &changes.arrived {
            debug!("tag arrived: {}", tag);
            self.listener.on_tag_arrived(tag);
        }
        for tag in &changes.departed {
            debug!("tag departed: {}", tag);
            self.listener.on_tag_departed(tag);
        }

        self.apply_writes(&mut current);

        if self.shared.take_snapshot_request() {
            self.listener.on_tags_snapshot(&current);
        }

        trace!("tags in field: {:?}", current);
        self.known = current;
        Ok(())
    }

    fn read_field(&mut self) -> Result<Vec<TagRecord>> {
        let uids = self.transport.list_visible_uids()?;
        let mut seen = HashSet::with_capacity(uids.len());
        let mut tags = Vec::with_capacity(uids.len());

        for uid in uids {
            if !seen.insert(uid.clone()) {
                debug!("{} listed twice, ignoring repeat", uid);
                continue;
            }
            match tag::read_tag(&mut *self.transport, &uid) {
                Ok(tag) => tags.push(tag),
                Err(e) if !e.aborts_tick() => debug!("dropping {} this cycle: {}", uid, e),
                Err(e) => return Err(e),
            }
        }
        Ok(tags)
    }

    fn apply_writes(&mut self, current: &mut [TagRecord]) {
        for CoalescedWrite { write, requests } in queue::coalesce(self.shared.drain_writes()) {
            let uid = write.uid;
            let success = match current.iter_mut().find(|t| t.uid() == &uid) {
                None => {
                    warn!("{} not found on reader, write dropped", uid);
                    false
                }
                Some(record) => match &write.kind {
                    WriteKind::Afi(afi) => {
                        match tag::write_afi(&mut *self.transport, &uid, *afi) {
                            Ok(()) => {
                                record.set_afi(*afi);
                                true
                            }
                            Err(e) => {
                                warn!("AFI write to {} failed: {}", uid, e);
                                false
                            }
                        }
                    }
                    WriteKind::Mid(mid) => {
                        match tag::write_mid(&mut *self.transport, &uid, mid)
                            .and_then(|()| record.set_mid(mid.clone()))
                        {
                            Ok(()) => true,
                            Err(e) => {
                                warn!("MID write to {} failed: {}", uid, e);
                                false
                            }
                        }
                    }
                },
            };

            // every request gets an answer, superseded ones share the outcome
            for _ in 0..requests {
                match write.kind {
                    WriteKind::Afi(_) => self.listener.on_afi_write_result(&uid, success),
                    WriteKind::Mid(_) => self.listener.on_mid_write_result(&uid, success),
                }
            }
        }
    }
}

/// Marks the reader `Idle` when the worker leaves `run`, unwinding included.
struct IdleOnExit(Arc<Shared>);

impl Drop for IdleOnExit {
    fn drop(&mut self) {
        self.0.set_state(ReaderState::Idle);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
