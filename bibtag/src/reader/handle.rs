// bibtag/src/reader/handle.rs

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::constants::POLL_THREAD_NAME;
use crate::listener::TagListener;
use crate::reader::config::ReaderConfig;
use crate::reader::control::{ReaderHandle, ReaderState};
use crate::reader::poll::PollLoop;
use crate::transport::Transport;
use crate::types::Uid;
use crate::{Error, Result};

/// Owner of a reader and its poll worker.
///
/// The worker takes the transport and listener while it runs and hands them
/// back when it exits, so a stopped reader can be started again. Dropping a
/// `TagReader` stops the worker and waits for it.
pub struct TagReader {
    handle: ReaderHandle,
    core: Option<PollLoop>,
    worker: Option<JoinHandle<PollLoop>>,
}

impl TagReader {
    pub fn new(
        transport: Box<dyn Transport>,
        listener: Box<dyn TagListener>,
        config: ReaderConfig,
    ) -> Self {
        let handle = ReaderHandle::default();
        let core = PollLoop::new(transport, listener, Arc::clone(&handle.shared), config);
        Self {
            handle,
            core: Some(core),
            worker: None,
        }
    }

    /// A cloneable control surface usable from other threads.
    pub fn handle(&self) -> ReaderHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> ReaderState {
        self.handle.state()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Connect if needed and spawn the poll worker.
    ///
    /// Calling `start` on a running reader does nothing. After a `stop` the
    /// previous worker is joined first. On a connection failure the reader
    /// goes back to `Idle` and the error is returned.
    pub fn start(&mut self) -> Result<()> {
        self.reap_worker()?;
        if matches!(
            self.state(),
            ReaderState::Running | ReaderState::Connecting
        ) {
            debug!("start ignored, reader already {:?}", self.state());
            return Ok(());
        }
        self.wait()?;

        let mut core = self.core.take().ok_or(Error::WorkerLost)?;
        let shared = Arc::clone(&self.handle.shared);
        shared.clear_stop();
        shared.set_state(ReaderState::Connecting);

        if !core.transport.is_connected() {
            info!("connecting to reader");
            if let Err(e) = core.transport.connect() {
                warn!("connect failed: {}", e);
                self.core = Some(core);
                shared.set_state(ReaderState::Idle);
                return Err(e);
            }
        }

        // A stop issued while connecting already moved the state on.
        if !shared.transition(ReaderState::Connecting, ReaderState::Running) {
            shared.set_state(ReaderState::Idle);
            self.core = Some(core);
            return Ok(());
        }

        let spawned = thread::Builder::new()
            .name(POLL_THREAD_NAME.to_string())
            .spawn(move || core.run());
        match spawned {
            Ok(worker) => {
                self.worker = Some(worker);
                Ok(())
            }
            Err(e) => {
                // the closure (and the loop it owned) is gone with the error
                shared.set_state(ReaderState::Idle);
                Err(Error::Io(e))
            }
        }
    }

    /// Request a stop; the worker finishes its current poll cycle and exits.
    /// Returns immediately, use `wait` to block until it has exited.
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Block until the poll worker has exited. Returns at once if none is
    /// running.
    pub fn wait(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        match worker.join() {
            Ok(core) => {
                self.core = Some(core);
                Ok(())
            }
            Err(_) => {
                self.handle.shared.set_state(ReaderState::Idle);
                Err(Error::WorkerLost)
            }
        }
    }

    /// `stop` followed by `wait`.
    pub fn shutdown(&mut self) -> Result<()> {
        self.stop();
        self.wait()
    }

    /// Run one poll cycle on the calling thread. Only allowed while no
    /// worker is active; connects first if needed.
    pub fn poll_once(&mut self) -> Result<()> {
        let core = self.idle_core()?;
        if !core.transport.is_connected() {
            core.transport.connect()?;
        }
        core.tick()
    }

    /// Close the transport of a stopped reader.
    pub fn disconnect(&mut self) -> Result<()> {
        self.idle_core()?.transport.disconnect()
    }

    pub fn request_snapshot(&self) {
        self.handle.request_snapshot();
    }

    pub fn enqueue_set_afi(&self, uid: impl Into<Uid>, afi: &str) -> Result<()> {
        self.handle.enqueue_set_afi(uid, afi)
    }

    pub fn enqueue_set_mid(&self, uid: impl Into<Uid>, mid: &str) -> Result<()> {
        self.handle.enqueue_set_mid(uid, mid)
    }

    pub fn pending_writes(&self) -> usize {
        self.handle.pending_writes()
    }

    fn idle_core(&mut self) -> Result<&mut PollLoop> {
        self.reap_worker()?;
        if self.worker.is_some() {
            return Err(Error::Busy);
        }
        self.core.as_mut().ok_or(Error::WorkerLost)
    }

    /// Join a worker that has exited or is on its way out (state already
    /// `Idle`), taking the loop back.
    fn reap_worker(&mut self) -> Result<()> {
        let exited = self
            .worker
            .as_ref()
            .is_some_and(|w| w.is_finished() || self.state() == ReaderState::Idle);
        if exited {
            self.wait()?;
        }
        Ok(())
    }
}

impl Drop for TagReader {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("poll worker did not shut down cleanly: {}", e);
        }
    }
}
