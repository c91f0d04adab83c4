//! Anything that can abort a request.
//!
//! The pipeline never inspects failures dynamically: a failure is either a
//! structured [`Error`] raised on purpose, or an unclassified fault that
//! slipped through (a framework error, a panic message, a foreign error
//! type). Matching on [`Failure`] decides logging severity and the response.

use std::fmt;

use super::error::{Error, ErrorEnvelope};

/// A request-aborting failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Raised deliberately with a dictionary kind.
    Structured(Error),
    /// Raised by something outside the dictionary.
    Unclassified(UnclassifiedFailure),
}

impl Failure {
    /// Wrap any error as unclassified.
    #[must_use]
    pub fn unclassified<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::Unclassified(UnclassifiedFailure::capture(error))
    }

    /// HTTP status the failure is answered with.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Structured(error) => error.http_status(),
            Self::Unclassified(_) => 500,
        }
    }

    /// Body the failure is answered with.
    #[must_use]
    pub fn client_envelope(&self) -> ErrorEnvelope {
        match self {
            Self::Structured(error) => error.to_client_envelope(),
            Self::Unclassified(raw) => ErrorEnvelope::unclassified(raw.trace_id.clone()),
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Self::Structured(error)
    }
}

impl From<UnclassifiedFailure> for Failure {
    fn from(raw: UnclassifiedFailure) -> Self {
        Self::Unclassified(raw)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(error) => error.fmt(f),
            Self::Unclassified(raw) => raw.fmt(f),
        }
    }
}

impl std::error::Error for Failure {}

/// Text captured from a failure outside the dictionary.
///
/// Only the logger sees this; clients receive the fixed unclassified body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclassifiedFailure {
    description: String,
    debug: String,
    trace_id: Option<String>,
}

impl UnclassifiedFailure {
    /// Build from a description and its debug rendering.
    #[must_use]
    pub fn new(description: impl Into<String>, debug: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            debug: debug.into(),
            trace_id: super::TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Capture an error's display and debug output.
    #[must_use]
    pub fn capture<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::new(error.to_string(), format!("{error:?}"))
    }

    /// Display rendering of the raw failure.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Debug rendering of the raw failure.
    #[must_use]
    pub fn debug(&self) -> &str {
        &self.debug
    }

    /// Trace identifier in scope when the failure was captured.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl fmt::Display for UnclassifiedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unclassified failure: {}", self.description)
    }
}
