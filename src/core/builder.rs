use std::sync::Arc;

use crate::{
    config::Config,
    error::ConfigError,
    report::{Reporter, Sink, StdoutSink},
    subscribers::Subscribe,
};

use super::supervisor::Supervisor;

/// Builder for constructing a [`Supervisor`] with optional features.
pub struct SupervisorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    sink: Option<Box<dyn Sink>>,
    os_signals: bool,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    ///
    /// Defaults: status lines go to stdout, OS signals stop the run, no subscribers.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            sink: None,
            os_signals: true,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive lifecycle events (start, starvation, quota, shutdown)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sends status lines to `sink` instead of stdout.
    pub fn with_sink(mut self, sink: impl Sink) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Enables or disables stopping the run on SIGINT / SIGTERM / SIGQUIT.
    pub fn with_os_signals(mut self, enabled: bool) -> Self {
        self.os_signals = enabled;
        self
    }

    /// Validates the configuration and returns the supervisor.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found in the configuration.
    pub fn build(self) -> Result<Supervisor, ConfigError> {
        self.cfg.validate()?;
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(StdoutSink::new()));
        Ok(Supervisor::new_internal(
            self.cfg,
            self.subscribers,
            Reporter::boxed(sink),
            self.os_signals,
        ))
    }
}
