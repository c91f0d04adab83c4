//! In-memory log sinks for tests.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

use super::{Logger, Mode};

/// Thread-safe byte buffer usable as a `tracing` writer.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Buffers behind a [`capturing_logger`].
#[derive(Clone, Debug, Default)]
pub struct CapturedLogs {
    /// JSON records of the persistent sink.
    pub persistent: SharedBuffer,
    /// Lines of the interactive sink.
    pub interactive: SharedBuffer,
}

impl CapturedLogs {
    /// Parsed persistent records, oldest first. Unparsable lines are skipped.
    #[must_use]
    pub fn persistent_records(&self) -> Vec<Value> {
        self.persistent
            .contents()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Interactive lines, oldest first.
    #[must_use]
    pub fn interactive_lines(&self) -> Vec<String> {
        self.interactive
            .contents()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

/// Logger whose sinks write into memory instead of a file and stdout.
#[must_use]
pub fn capturing_logger(mode: Mode) -> (Logger, CapturedLogs) {
    let logs = CapturedLogs::default();
    let logger = Logger::builder(mode)
        .persistent_writer(logs.persistent.clone())
        .interactive_writer(logs.interactive.clone())
        .build();
    (logger, logs)
}
