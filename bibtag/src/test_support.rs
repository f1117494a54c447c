//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup and event recording
//! so tests across the crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::listener::TagListener;
use crate::reader::{ReaderBuilder, ReaderConfig, TagReader};
use crate::tag::TagRecord;
use crate::transport::mock::MockTransport;
use crate::types::{Mid, Uid};
use crate::Result;

/// One listener callback, as recorded by `RecordingListener`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    CycleStarted,
    Arrived(TagRecord),
    Departed(TagRecord),
    Snapshot(Vec<TagRecord>),
    AfiWritten(Uid, bool),
    MidWritten(Uid, bool),
}

/// Listener that records every callback in order. Clones share the log, so
/// a test keeps one clone and hands the other to the reader.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<ListenerEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<ListenerEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<ListenerEvent> {
        self.log().clone()
    }

    pub fn clear(&self) {
        self.log().clear();
    }

    pub fn arrived_uids(&self) -> Vec<Uid> {
        self.log()
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::Arrived(t) => Some(t.uid().clone()),
                _ => None,
            })
            .collect()
    }

    pub fn departed_uids(&self) -> Vec<Uid> {
        self.log()
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::Departed(t) => Some(t.uid().clone()),
                _ => None,
            })
            .collect()
    }

    /// AFI and MID write outcomes, in order.
    pub fn write_results(&self) -> Vec<ListenerEvent> {
        self.log()
            .iter()
            .filter(|e| matches!(e, ListenerEvent::AfiWritten(..) | ListenerEvent::MidWritten(..)))
            .cloned()
            .collect()
    }

    pub fn last_snapshot(&self) -> Option<Vec<TagRecord>> {
        self.log().iter().rev().find_map(|e| match e {
            ListenerEvent::Snapshot(tags) => Some(tags.clone()),
            _ => None,
        })
    }

    pub fn cycles(&self) -> usize {
        self.log()
            .iter()
            .filter(|e| matches!(e, ListenerEvent::CycleStarted))
            .count()
    }
}

impl TagListener for RecordingListener {
    fn on_tag_arrived(&mut self, tag: &TagRecord) {
        self.log().push(ListenerEvent::Arrived(tag.clone()));
    }

    fn on_tag_departed(&mut self, tag: &TagRecord) {
        self.log().push(ListenerEvent::Departed(tag.clone()));
    }

    fn on_tags_snapshot(&mut self, tags: &[TagRecord]) {
        self.log().push(ListenerEvent::Snapshot(tags.to_vec()));
    }

    fn on_afi_write_result(&mut self, uid: &Uid, success: bool) {
        self.log().push(ListenerEvent::AfiWritten(uid.clone(), success));
    }

    fn on_mid_write_result(&mut self, uid: &Uid, success: bool) {
        self.log().push(ListenerEvent::MidWritten(uid.clone(), success));
    }

    fn on_poll_cycle_started(&mut self) {
        self.log().push(ListenerEvent::CycleStarted);
    }
}

/// A valid single-volume MID whose item id is `item` zero-padded to ten
/// digits.
#[doc(hidden)]
pub fn sample_mid(item: u32) -> Mid {
    // 16 ASCII digits always pass Mid::new
    Mid::new(format!("110101{:010}", item)).unwrap_or_else(|e| panic!("{}", e))
}

/// Build a MockTransport with the given `(uid, mid)` tags already in the
/// field.
#[doc(hidden)]
pub fn mock_with_tags(tags: &[(&str, &Mid)]) -> Result<MockTransport> {
    let mock = MockTransport::new();
    for (uid, mid) in tags {
        mock.insert_tag(*uid, mid)?;
    }
    Ok(mock)
}

/// Convenience: a reader over a clone of `mock` reporting to a clone of
/// `listener`, polling every `interval`.
#[doc(hidden)]
pub fn reader_with(
    mock: &MockTransport,
    listener: &RecordingListener,
    interval: Duration,
) -> Result<TagReader> {
    ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .with_listener(Box::new(listener.clone()))
        .with_config(ReaderConfig::default().with_poll_interval(interval))
        .build()
}
