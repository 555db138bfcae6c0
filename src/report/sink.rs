//! # Output sinks for status lines.
//!
//! A [`Sink`] is the destination of the reporter. It is always called under the
//! reporter's output lock, so implementations never see concurrent writes.
//!
//! - [`StdoutSink`]: the process standard output (one `write` per line)
//! - [`MemorySink`]: shared in-memory capture, used by tests and embedders

use std::{
    io::{self, Write},
    sync::Arc,
};

use parking_lot::Mutex;

use super::status::StatusLine;

/// Destination for status lines.
pub trait Sink: Send + 'static {
    /// Writes one complete line.
    fn write_line(&mut self, line: &StatusLine) -> io::Result<()>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Writes lines to standard output.
#[derive(Default)]
pub struct StdoutSink {
    buf: String,
}

impl StdoutSink {
    /// Construct a new [`StdoutSink`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for StdoutSink {
    fn write_line(&mut self, line: &StatusLine) -> io::Result<()> {
        use std::fmt::Write as _;

        self.buf.clear();
        // Formatting into a String cannot fail.
        let _ = writeln!(self.buf, "{line}");
        let mut out = io::stdout().lock();
        out.write_all(self.buf.as_bytes())?;
        out.flush()
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}

/// Captures lines in memory; clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<StatusLine>>>,
}

impl MemorySink {
    /// Construct an empty [`MemorySink`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line captured so far.
    pub fn lines(&self) -> Vec<StatusLine> {
        self.lines.lock().clone()
    }

    /// Returns the captured lines rendered as text.
    pub fn rendered(&self) -> Vec<String> {
        self.lines.lock().iter().map(ToString::to_string).collect()
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// True if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &StatusLine) -> io::Result<()> {
        self.lines.lock().push(*line);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
