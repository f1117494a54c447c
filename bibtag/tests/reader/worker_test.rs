#[path = "../common/mod.rs"]
mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use bibtag::listener::TagListener;
use bibtag::tag::TagRecord;
use bibtag::test_support::RecordingListener;
use bibtag::transport::{MockCall, MockTransport, Transport};
use bibtag::types::{Afi, Uid};
use bibtag::{Error, ReaderBuilder, ReaderConfig, ReaderHandle, ReaderState};
use serial_test::serial;

/// Records like `RecordingListener` and asks the reader to stop on the first
/// arrival.
struct StopOnArrival {
    inner: RecordingListener,
    handle: Arc<OnceLock<ReaderHandle>>,
}

impl TagListener for StopOnArrival {
    fn on_tag_arrived(&mut self, tag: &TagRecord) {
        if let Some(h) = self.handle.get() {
            h.stop();
        }
        self.inner.on_tag_arrived(tag);
    }

    fn on_tag_departed(&mut self, tag: &TagRecord) {
        self.inner.on_tag_departed(tag);
    }

    fn on_afi_write_result(&mut self, uid: &Uid, success: bool) {
        self.inner.on_afi_write_result(uid, success);
    }
}

/// Panics on the first arrival it sees, records normally afterwards.
struct PanicsOnce {
    inner: RecordingListener,
    panicked: Arc<AtomicBool>,
}

impl TagListener for PanicsOnce {
    fn on_tag_arrived(&mut self, tag: &TagRecord) {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("listener bug on {}", tag.uid());
        }
        self.inner.on_tag_arrived(tag);
    }

    fn on_tag_departed(&mut self, tag: &TagRecord) {
        self.inner.on_tag_departed(tag);
    }
}

#[test]
#[serial]
fn start_and_stop_cycle_states() -> anyhow::Result<()> {
    common::init_logger();
    let mock = common::mock_with_tags(&[("A", &common::item_mid(1))])?;
    let listener = RecordingListener::new();
    let mut reader = common::idle_reader(&mock, &listener);
    assert_eq!(reader.state(), ReaderState::Idle);

    reader.start()?;
    assert!(reader.is_running());
    // a second start is ignored
    reader.start()?;
    assert!(common::wait_for(|| listener.arrived_uids() == vec![Uid::from("A")]));

    reader.stop();
    assert_ne!(reader.state(), ReaderState::Running);
    reader.wait()?;
    assert_eq!(reader.state(), ReaderState::Idle);
    Ok(())
}

#[test]
#[serial]
fn handle_drives_worker_from_another_thread() -> anyhow::Result<()> {
    let mock = common::mock_with_tags(&[("A", &common::item_mid(1))])?;
    let listener = RecordingListener::new();
    let mut reader = common::idle_reader(&mock, &listener);
    reader.start()?;
    assert!(common::wait_for(|| !listener.arrived_uids().is_empty()));

    let handle = reader.handle();
    let controller = thread::spawn(move || -> bibtag::Result<()> {
        handle.enqueue_set_afi("A", "194")?;
        handle.request_snapshot();
        Ok(())
    });
    controller
        .join()
        .map_err(|_| anyhow::anyhow!("controller thread panicked"))??;

    assert!(common::wait_for(|| mock.afi_of("A") == Some(Afi::CHECKED_OUT)));
    assert!(common::wait_for(|| listener.last_snapshot().is_some()));
    reader.shutdown()?;
    Ok(())
}

#[test]
#[serial]
fn stop_during_cycle_finishes_it_then_goes_quiet() -> anyhow::Result<()> {
    let mock = common::mock_with_tags(&[
        ("A", &common::item_mid(1)),
        ("B", &common::item_mid(2)),
    ])?;
    let recorder = RecordingListener::new();
    let slot = Arc::new(OnceLock::new());
    let mut reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .with_listener(Box::new(StopOnArrival {
            inner: recorder.clone(),
            handle: Arc::clone(&slot),
        }))
        .with_config(ReaderConfig::default().with_poll_interval(common::FAST))
        .build()?;
    let _ = slot.set(reader.handle());

    reader.enqueue_set_afi("B", "7")?;
    reader.start()?;
    reader.wait()?;
    assert_eq!(reader.state(), ReaderState::Idle);

    // the interrupted cycle still delivered everything
    assert_eq!(recorder.arrived_uids(), vec![Uid::from("A"), Uid::from("B")]);
    assert_eq!(mock.afi_of("B"), Some(Afi::CHECKED_IN));

    let calls = mock.calls();
    assert_eq!(calls.iter().filter(|c| **c == MockCall::ListUids).count(), 1);
    thread::sleep(Duration::from_millis(30));
    assert_eq!(mock.calls().len(), calls.len());
    Ok(())
}

#[test]
#[serial]
fn connect_failure_returns_to_idle() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    mock.set_connect_failures(1);
    let listener = RecordingListener::new();
    let mut reader = common::idle_reader(&mock, &listener);

    assert!(matches!(reader.start(), Err(Error::Transport(_))));
    assert_eq!(reader.state(), ReaderState::Idle);
    assert_eq!(listener.cycles(), 0);

    reader.start()?;
    assert!(reader.is_running());
    reader.shutdown()?;
    Ok(())
}

#[test]
#[serial]
fn restart_keeps_known_tags() -> anyhow::Result<()> {
    let mock = common::mock_with_tags(&[("A", &common::item_mid(1))])?;
    let listener = RecordingListener::new();
    let mut reader = common::idle_reader(&mock, &listener);

    reader.start()?;
    assert!(common::wait_for(|| !listener.arrived_uids().is_empty()));
    reader.shutdown()?;

    listener.clear();
    reader.start()?;
    assert!(common::wait_for(|| listener.cycles() >= 2));
    reader.shutdown()?;
    assert!(listener.arrived_uids().is_empty());
    Ok(())
}

#[test]
#[serial]
fn disconnect_on_stop_closes_transport() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .with_config(
            ReaderConfig::default()
                .with_poll_interval(common::FAST)
                .with_disconnect_on_stop(true),
        )
        .build()?;

    reader.start()?;
    reader.shutdown()?;
    assert_eq!(mock.calls().last(), Some(&MockCall::Disconnect));
    assert!(matches!(reader.poll_once(), Ok(())));
    Ok(())
}

#[test]
#[serial]
fn busy_while_worker_active() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let listener = RecordingListener::new();
    let mut reader = common::idle_reader(&mock, &listener);
    reader.start()?;
    assert!(matches!(reader.poll_once(), Err(Error::Busy)));
    assert!(matches!(reader.disconnect(), Err(Error::Busy)));
    reader.shutdown()?;
    reader.disconnect()?;
    Ok(())
}

#[test]
#[serial]
fn drop_stops_worker() -> anyhow::Result<()> {
    let mock = common::mock_with_tags(&[("A", &common::item_mid(1))])?;
    let listener = RecordingListener::new();
    let handle = {
        let mut reader = common::idle_reader(&mock, &listener);
        reader.start()?;
        assert!(common::wait_for(|| listener.cycles() > 0));
        reader.handle()
    };
    assert_eq!(handle.state(), ReaderState::Idle);
    let calls = mock.calls().len();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(mock.calls().len(), calls);
    Ok(())
}

#[test]
#[serial]
fn listener_panic_does_not_kill_worker() -> anyhow::Result<()> {
    let mock = common::mock_with_tags(&[("A", &common::item_mid(1))])?;
    let recorder = RecordingListener::new();
    let panicked = Arc::new(AtomicBool::new(false));
    let mut reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .with_listener(Box::new(PanicsOnce {
            inner: recorder.clone(),
            panicked: Arc::clone(&panicked),
        }))
        .with_config(ReaderConfig::default().with_poll_interval(common::FAST))
        .build()?;

    reader.start()?;
    assert!(common::wait_for(|| panicked.load(Ordering::SeqCst)));

    // the cycle that panicked never became the baseline, so A is reported
    // again by a later cycle
    assert!(common::wait_for(|| recorder.arrived_uids() == vec![Uid::from("A")]));
    assert!(reader.is_running());
    let calls = mock.calls().len();
    assert!(common::wait_for(|| mock.calls().len() > calls));

    reader.shutdown()?;
    assert_eq!(reader.state(), ReaderState::Idle);
    Ok(())
}

#[test]
#[serial]
fn stopped_worker_frees_reader_without_wait() -> anyhow::Result<()> {
    let mock = common::mock_with_tags(&[("A", &common::item_mid(1))])?;
    let listener = RecordingListener::new();
    let mut reader = common::idle_reader(&mock, &listener);

    reader.start()?;
    reader.stop();
    assert!(common::wait_for(|| reader.state() == ReaderState::Idle));

    reader.poll_once()?;
    reader.disconnect()?;
    assert!(!mock.is_connected());
    Ok(())
}
