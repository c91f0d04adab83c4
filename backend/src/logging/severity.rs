//! Six-level severity scale and the run mode that selects console verbosity.

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

use crate::domain::{Error, ErrorKind};

/// Environment variable holding the run mode.
pub const MODE_VARIABLE: &str = "ADOPTME_MODE";

/// Log severities, most urgent first.
///
/// `tracing` has five levels, so `fatal` and `error` share
/// [`Level::ERROR`] and are told apart by the `severity` field every record
/// carries; `http` sits on [`Level::DEBUG`] and `debug` on [`Level::TRACE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The process or a request hit a fault it cannot recover from.
    Fatal,
    /// An operation failed.
    Error,
    /// Something unexpected that did not fail.
    Warning,
    /// Lifecycle events.
    Info,
    /// One line per handled request.
    Http,
    /// Developer diagnostics.
    Debug,
}

impl Severity {
    /// Every severity, most urgent first.
    pub const ALL: [Self; 6] = [
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Http,
        Self::Debug,
    ];

    /// Lower-case label written to the sinks.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Http => "http",
            Self::Debug => "debug",
        }
    }

    /// Parse a label produced by [`Severity::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|severity| severity.label() == label)
    }

    /// `tracing` level events of this severity are emitted at.
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Fatal | Self::Error => Level::ERROR,
            Self::Warning => Level::WARN,
            Self::Info => Level::INFO,
            Self::Http => Level::DEBUG,
            Self::Debug => Level::TRACE,
        }
    }

    /// Filter admitting this severity and everything more urgent.
    #[must_use]
    pub fn threshold(self) -> LevelFilter {
        LevelFilter::from_level(self.level())
    }

    /// Severity for events raised without a `severity` field.
    ///
    /// Only the logger's own request lines are `http`; a bare
    /// [`Level::DEBUG`] event from another crate is `debug`.
    #[must_use]
    pub fn from_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warning,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Console shows `debug` and above.
    Development,
    /// Console shows `info` and above.
    Production,
}

impl Mode {
    /// Least urgent severity the console admits.
    #[must_use]
    pub const fn interactive_threshold(self) -> Severity {
        match self {
            Self::Development => Severity::Debug,
            Self::Production => Severity::Info,
        }
    }

    /// Resolve the configured value. There is no default mode.
    ///
    /// # Errors
    /// `MISSING_ENV_VARIABLE` when unset, `INVALID_CONFIG` when the value
    /// is not a known mode.
    pub fn resolve(raw: Option<&str>) -> Result<Self, Error> {
        raw.map_or_else(
            || {
                Err(Error::new(ErrorKind::MissingEnvVariable)
                    .with_detail(json!({ "variable": MODE_VARIABLE })))
            },
            str::parse,
        )
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEV" | "DEVELOPMENT" => Ok(Self::Development),
            "PROD" | "PRODUCTION" => Ok(Self::Production),
            _ => Err(Error::new(ErrorKind::InvalidConfig).with_detail(json!({
                "setting": "mode",
                "value": s,
                "allowed": ["DEV", "PROD"],
            }))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "DEV",
            Self::Production => "PROD",
        })
    }
}
