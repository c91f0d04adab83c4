//! The severity-leveled logger handle.
//!
//! A [`Logger`] owns a `tracing` [`Dispatch`] built from a registry with
//! two formatting layers:
//!
//! - the persistent sink, JSON lines, admitting `fatal` and `error`;
//! - the interactive sink, coloured lines, admitting the mode's threshold.
//!
//! Every call formats and writes before returning. The file sink sits
//! behind a mutex and each record is written with a single call, so
//! concurrent writers never interleave partial lines.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use serde_json::{Value, json};
use tracing::dispatcher::{self, Dispatch};
use tracing::Level;
use tracing_subscriber::fmt::{self as tracing_fmt, MakeWriter, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{Layer, registry};

use super::format::{ConsoleFormat, JsonRecordFormat};
use super::severity::{Mode, Severity};
use crate::domain::{Error, ErrorKind};

/// Target attached to records emitted through [`Logger`].
pub const LOG_TARGET: &str = "adoptme";

macro_rules! emit {
    ($level:expr, $severity:expr, $message:expr, $args:expr) => {
        match $args {
            Some(args) => tracing::event!(
                target: LOG_TARGET,
                $level,
                severity = $severity,
                args = %args,
                "{}",
                $message
            ),
            None => tracing::event!(target: LOG_TARGET, $level, severity = $severity, "{}", $message),
        }
    };
}

fn emit(severity: Severity, message: &str, args: Option<&str>) {
    let label = severity.label();
    match severity {
        Severity::Fatal | Severity::Error => emit!(Level::ERROR, label, message, args),
        Severity::Warning => emit!(Level::WARN, label, message, args),
        Severity::Info => emit!(Level::INFO, label, message, args),
        Severity::Http => emit!(Level::DEBUG, label, message, args),
        Severity::Debug => emit!(Level::TRACE, label, message, args),
    }
}

/// Cloneable handle writing to the persistent and interactive sinks.
///
/// # Examples
/// ```
/// use adoptme_backend::logging::{Logger, Mode, Severity};
///
/// let logger = Logger::builder(Mode::Production).build();
/// logger.log(Severity::Info, "server starting");
/// ```
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    mode: Mode,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("mode", &self.mode).finish_non_exhaustive()
    }
}

impl Logger {
    /// Start configuring a logger for `mode`.
    ///
    /// Without further configuration the persistent sink discards records
    /// and the interactive sink writes plain lines to stdout.
    #[must_use]
    pub fn builder(mode: Mode) -> LoggerBuilder {
        LoggerBuilder::new(mode)
    }

    /// Logger appending JSON records to `path` and coloured lines to stdout.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    /// `INVALID_CONFIG` when the file cannot be opened for appending.
    pub fn open(mode: Mode, path: &Path) -> Result<Self, Error> {
        let file = open_append(path).map_err(|error| {
            Error::new(ErrorKind::InvalidConfig).with_detail(json!({
                "setting": "log_file",
                "path": path.display().to_string(),
                "reason": error.to_string(),
            }))
        })?;
        Ok(Self::builder(mode)
            .persistent_writer(Mutex::new(file))
            .interactive_writer(io::stdout)
            .ansi(true)
            .build())
    }

    /// Mode the interactive threshold was chosen from.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Write `message` at `severity`.
    pub fn log(&self, severity: Severity, message: &str) {
        dispatcher::with_default(&self.dispatch, || emit(severity, message, None));
    }

    /// Write `message` at `severity` with attached arguments.
    ///
    /// Object arguments become top-level keys of the persistent record.
    pub fn log_with(&self, severity: Severity, message: &str, args: &Value) {
        let rendered = args.to_string();
        dispatcher::with_default(&self.dispatch, || emit(severity, message, Some(&rendered)));
    }

    /// Write at `fatal`.
    pub fn fatal(&self, message: &str, args: &Value) {
        self.log_with(Severity::Fatal, message, args);
    }

    /// Write at `error`.
    pub fn error(&self, message: &str, args: &Value) {
        self.log_with(Severity::Error, message, args);
    }

    /// Write at `warning`.
    pub fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Write at `info`.
    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Write at `http`.
    pub fn http(&self, message: &str, args: &Value) {
        self.log_with(Severity::Http, message, args);
    }

    /// Write at `debug`.
    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    /// Run `f` with this logger as the thread's default dispatcher, so plain
    /// `tracing` macros reach its sinks.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Install as the process-wide default and bridge `log` records.
    ///
    /// # Errors
    /// When a global subscriber is already installed.
    pub fn install_global(&self) -> Result<(), TryInitError> {
        self.dispatch.clone().try_init()
    }
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    mode: Mode,
    persistent: BoxMakeWriter,
    interactive: BoxMakeWriter,
    ansi: bool,
}

impl LoggerBuilder {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            persistent: BoxMakeWriter::new(io::sink),
            interactive: BoxMakeWriter::new(io::stdout),
            ansi: false,
        }
    }

    /// Destination of `fatal` and `error` records.
    #[must_use]
    pub fn persistent_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.persistent = BoxMakeWriter::new(writer);
        self
    }

    /// Destination of console lines.
    #[must_use]
    pub fn interactive_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.interactive = BoxMakeWriter::new(writer);
        self
    }

    /// Colour console lines by severity.
    #[must_use]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Assemble the two sinks.
    #[must_use]
    pub fn build(self) -> Logger {
        let persistent = tracing_fmt::layer()
            .event_format(JsonRecordFormat)
            .with_ansi(false)
            .with_writer(self.persistent)
            .with_filter(Severity::Error.threshold());
        let interactive = tracing_fmt::layer()
            .event_format(ConsoleFormat)
            .with_ansi(self.ansi)
            .with_writer(self.interactive)
            .with_filter(self.mode.interactive_threshold().threshold());
        let subscriber = registry().with(persistent).with(interactive);
        Logger {
            dispatch: Dispatch::new(subscriber),
            mode: self.mode,
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::logging::test_support::capturing_logger;

    #[rstest]
    #[case(Mode::Production, Severity::Debug, false)]
    #[case(Mode::Production, Severity::Http, false)]
    #[case(Mode::Production, Severity::Info, true)]
    #[case(Mode::Development, Severity::Debug, true)]
    #[case(Mode::Development, Severity::Http, true)]
    fn interactive_sink_follows_mode(
        #[case] mode: Mode,
        #[case] severity: Severity,
        #[case] shown: bool,
    ) {
        let (logger, logs) = capturing_logger(mode);
        logger.log(severity, "sample");
        assert_eq!(!logs.interactive_lines().is_empty(), shown);
        assert!(logs.persistent_records().is_empty());
    }

    #[test]
    fn error_reaches_both_sinks_in_production() {
        let (logger, logs) = capturing_logger(Mode::Production);
        logger.error("lookup failed", &json!({ "code": 40401 }));

        let records = logs.persistent_records();
        assert_eq!(records.len(), 1);
        let record = records.first().expect("record");
        assert_eq!(record["severity"], "error");
        assert_eq!(record["message"], "lookup failed");
        assert_eq!(record["code"], 40401);
        assert!(record["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));

        let lines = logs.interactive_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines.first().is_some_and(|line| line.contains("error: lookup failed")));
    }

    #[test]
    fn fatal_is_labelled_apart_from_error() {
        let (logger, logs) = capturing_logger(Mode::Development);
        logger.fatal("boom", &json!({}));
        logger.warning("careful");

        let severities: Vec<_> = logs
            .persistent_records()
            .iter()
            .map(|record| record["severity"].clone())
            .collect();
        assert_eq!(severities, [json!("fatal")]);
        assert_eq!(logs.interactive_lines().len(), 2);
    }

    #[test]
    fn non_object_args_are_kept_under_args() {
        let (logger, logs) = capturing_logger(Mode::Development);
        logger.error("failed", &json!(["missing dep A", "missing dep B"]));
        let records = logs.persistent_records();
        assert_eq!(
            records.first().map(|record| record["args"].clone()),
            Some(json!(["missing dep A", "missing dep B"]))
        );
    }

    #[test]
    fn plain_tracing_events_use_level_severity() {
        let (logger, logs) = capturing_logger(Mode::Development);
        logger.in_scope(|| tracing::warn!(attempt = 2, "retrying"));
        let lines = logs.interactive_lines();
        assert!(lines.first().is_some_and(|line| {
            line.contains("warning: retrying") && line.contains("attempt=2")
        }));
    }

    #[test]
    fn foreign_debug_events_are_not_labelled_http() {
        let (logger, logs) = capturing_logger(Mode::Development);
        logger.in_scope(|| tracing::debug!(target: "h2::codec", "frame received"));
        logger.http("GET /api/pets 200", &json!({ "status": 200 }));

        let lines = logs.interactive_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.first().is_some_and(|line| line.contains("debug: frame received")));
        assert!(lines.get(1).is_some_and(|line| line.contains("http: GET /api/pets 200")));
    }

    #[test]
    fn open_creates_the_log_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("errors.log");
        let logger = Logger::open(Mode::Production, &path).expect("open logger");
        logger.error("persisted", &json!({ "code": 50001 }));

        let contents = fs::read_to_string(&path).expect("read log");
        let record: Value = serde_json::from_str(contents.trim()).expect("json line");
        assert_eq!(record["message"], "persisted");
        assert_eq!(record["code"], 50001);
    }
}
