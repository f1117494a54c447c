// bibtag/src/reader/builder.rs

use crate::listener::{NoopListener, TagListener};
use crate::reader::config::ReaderConfig;
use crate::reader::handle::TagReader;
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a `TagReader`.
#[derive(Default)]
pub struct ReaderBuilder {
    transport: Option<Box<dyn Transport>>,
    listener: Option<Box<dyn TagListener>>,
    config: ReaderConfig,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the reader I/O (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Where events go. Without one, events are discarded.
    pub fn with_listener(mut self, listener: Box<dyn TagListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder. A transport is required; otherwise returns
    /// `Error::MissingTransport`. Nothing is opened until `start`.
    pub fn build(self) -> Result<TagReader> {
        let transport = self.transport.ok_or(Error::MissingTransport)?;
        let listener = self
            .listener
            .unwrap_or_else(|| Box::new(NoopListener));
        Ok(TagReader::new(transport, listener, self.config))
    }
}
