// bibtag/src/listener.rs

use crate::tag::TagRecord;
use crate::types::Uid;

/// Receiver of reader events.
///
/// Every callback runs synchronously on the poll worker thread, so
/// implementations should return quickly and hand work to their own threads
/// if needed.
pub trait TagListener: Send {
    /// A tag entered the field (or its MID changed).
    fn on_tag_arrived(&mut self, tag: &TagRecord);

    /// A tag left the field (or its MID changed).
    fn on_tag_departed(&mut self, tag: &TagRecord);

    /// Answer to `request_snapshot`: every tag currently in the field.
    fn on_tags_snapshot(&mut self, _tags: &[TagRecord]) {}

    /// Outcome of a queued AFI write.
    fn on_afi_write_result(&mut self, _uid: &Uid, _success: bool) {}

    /// Outcome of a queued MID write.
    fn on_mid_write_result(&mut self, _uid: &Uid, _success: bool) {}

    /// A poll cycle is starting.
    fn on_poll_cycle_started(&mut self) {}
}

/// Listener that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl TagListener for NoopListener {
    fn on_tag_arrived(&mut self, _tag: &TagRecord) {}

    fn on_tag_departed(&mut self, _tag: &TagRecord) {}
}

impl<L: TagListener + ?Sized> TagListener for Box<L> {
    fn on_tag_arrived(&mut self, tag: &TagRecord) {
        (**self).on_tag_arrived(tag)
    }

    fn on_tag_departed(&mut self, tag: &TagRecord) {
        (**self).on_tag_departed(tag)
    }

    fn on_tags_snapshot(&mut self, tags: &[TagRecord]) {
        (**self).on_tags_snapshot(tags)
    }

    fn on_afi_write_result(&mut self, uid: &Uid, success: bool) {
        (**self).on_afi_write_result(uid, success)
    }

    fn on_mid_write_result(&mut self, uid: &Uid, success: bool) {
        (**self).on_mid_write_result(uid, success)
    }

    fn on_poll_cycle_started(&mut self) {
        (**self).on_poll_cycle_started()
    }
}
