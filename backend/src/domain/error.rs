//! Structured error carrier.
//!
//! An [`Error`] binds a failure to exactly one dictionary entry
//! ([`ErrorKind`]) plus free-form details. It is transport agnostic: inbound
//! adapters decide how the log payload and client envelope produced here are
//! written out.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::error_kind::{ErrorEntry, ErrorKind};
use super::trace_id::TraceId;

/// Message used when an error is raised without a resolvable kind.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error, this error is not found in dictionary";

/// Code reported to clients for failures that were never classified.
pub const UNCLASSIFIED_CODE: u32 = 9001;

/// Message reported to clients for failures that were never classified.
pub const UNCLASSIFIED_MESSAGE: &str = "internal server error";

const ERROR_STATUS: &str = "error";

/// Domain error bound to a dictionary entry.
///
/// # Examples
/// ```
/// use adoptme_backend::domain::{Error, ErrorKind};
///
/// let err = Error::new(ErrorKind::DependencyNotFound)
///     .with_detail("user not found")
///     .with_detail("pet not found");
/// assert_eq!(err.code(), 40010);
/// assert_eq!(err.details().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    details: Vec<Value>,
    trace_id: Option<String>,
}

impl Error {
    /// Raise `kind` with no details.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self::create(Some(kind), Vec::new())
    }

    /// Raise an optional kind with details.
    ///
    /// A missing kind degrades to [`ErrorKind::InternalServerError`] carrying
    /// [`UNKNOWN_ERROR_MESSAGE`]. The trace identifier in scope, if any, is
    /// captured.
    #[must_use]
    pub fn create(kind: Option<ErrorKind>, details: Vec<Value>) -> Self {
        let (kind, message) = match kind {
            Some(kind) => (kind, kind.entry().message().to_owned()),
            None => (ErrorKind::InternalServerError, UNKNOWN_ERROR_MESSAGE.to_owned()),
        };
        Self {
            kind,
            message,
            details,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Raise a kind given by its symbolic name, e.g. `"RESOURCE_NOT_FOUND"`.
    ///
    /// Names missing from the dictionary degrade like [`Error::create`] with
    /// no kind.
    #[must_use]
    pub fn from_kind_name(name: &str, details: Vec<Value>) -> Self {
        Self::create(name.parse().ok(), details)
    }

    /// Append one detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Append several details in order.
    #[must_use]
    pub fn with_details<I, V>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.details.extend(details.into_iter().map(Into::into));
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// `RESOURCE_NOT_FOUND` with a single detail.
    #[must_use]
    pub fn not_found(detail: impl Into<Value>) -> Self {
        Self::new(ErrorKind::ResourceNotFound).with_detail(detail)
    }

    /// `MISSING_REQUIRED_FIELDS` listing the absent field names.
    #[must_use]
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ErrorKind::MissingRequiredFields)
            .with_details(fields.into_iter().map(|field| Value::String(field.into())))
    }

    /// `INVALID_RESOURCE_ID` naming the rejected identifier.
    #[must_use]
    pub fn invalid_id(raw: &str) -> Self {
        Self::new(ErrorKind::InvalidResourceId).with_detail(format!("invalid id: {raw}"))
    }

    /// `INTERNAL_SERVER_ERROR` with a diagnostic detail kept out of responses.
    #[must_use]
    pub fn internal(detail: impl Into<Value>) -> Self {
        Self::new(ErrorKind::InternalServerError).with_detail(detail)
    }

    /// Dictionary kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Dictionary entry for the kind.
    #[must_use]
    pub const fn entry(&self) -> ErrorEntry {
        self.kind.entry()
    }

    /// Numeric code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.kind.entry().code()
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached details, in insertion order.
    #[must_use]
    pub fn details(&self) -> &[Value] {
        &self.details
    }

    /// HTTP status for the kind.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.kind.entry().http_status()
    }

    /// Whether the kind is operational.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.kind.entry().is_operational()
    }

    /// Trace identifier captured at creation, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Record written to the logger for this error.
    #[must_use]
    pub fn to_log_payload(&self) -> LogPayload {
        LogPayload {
            kind: self.kind,
            message: self.message.clone(),
            code: self.code(),
            http_status: self.http_status(),
            is_operational: self.is_operational(),
            details: self.details.clone(),
            trace_id: self.trace_id.clone(),
        }
    }

    /// Body sent to the client.
    ///
    /// Details are withheld for non-operational kinds; they remain available
    /// through [`Error::to_log_payload`].
    #[must_use]
    pub fn to_client_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            status: ERROR_STATUS.to_owned(),
            error: ErrorBody {
                code: self.code(),
                message: self.message.clone(),
                details: self.is_operational().then(|| self.details.clone()),
                trace_id: self.trace_id.clone(),
            },
        }
    }
}

impl Default for Error {
    fn default() -> Self {
        Self::create(None, Vec::new())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.code(), self.message)
    }
}

impl std::error::Error for Error {}

/// Structured record describing an [`Error`] for the logger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPayload {
    /// Symbolic kind name.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
    /// Numeric code.
    pub code: u32,
    /// HTTP status.
    pub http_status: u16,
    /// Operational flag.
    pub is_operational: bool,
    /// Details, never redacted.
    pub details: Vec<Value>,
    /// Correlation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Uniform JSON body for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `"error"`.
    #[schema(example = "error")]
    pub status: String,
    /// Failure description.
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    /// Fixed body for failures that were never classified.
    #[must_use]
    pub fn unclassified(trace_id: Option<String>) -> Self {
        Self {
            status: ERROR_STATUS.to_owned(),
            error: ErrorBody {
                code: UNCLASSIFIED_CODE,
                message: UNCLASSIFIED_MESSAGE.to_owned(),
                details: None,
                trace_id,
            },
        }
    }
}

/// Error section of an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Numeric code from the dictionary, or `9001` when unclassified.
    #[schema(example = 40401)]
    pub code: u32,
    /// Client-facing message.
    #[schema(example = "The requested resource does not exist")]
    pub message: String,
    /// Details for operational errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub details: Option<Vec<Value>>,
    /// Correlation identifier echoed from the `trace-id` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}
