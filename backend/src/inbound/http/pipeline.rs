//! Terminal error pipeline.
//!
//! Every failure raised while handling a request ends up in
//! [`ErrorPipeline::handle`], which logs it once and builds the single
//! response for it. Severity follows the failure:
//!
//! | failure                    | severity |
//! |----------------------------|----------|
//! | structured, operational    | `error`  |
//! | structured, non-operational| `fatal`  |
//! | unclassified               | `fatal`  |

use std::cell::Cell;
use std::rc::Rc;

use actix_web::HttpResponse;
use serde_json::{Value, json};

use super::error::envelope_response;
use crate::domain::{Error, Failure, UnclassifiedFailure};
use crate::logging::{Logger, Severity};

/// Per-request flag recording whether a response has been committed.
///
/// Clones share the flag, so the copy stored in request extensions and
/// the one held by the middleware agree.
#[derive(Clone, Debug, Default)]
pub struct ResponseLatch(Rc<Cell<bool>>);

impl ResponseLatch {
    /// Claim the response. Returns `false` when it was already claimed.
    #[must_use]
    pub fn commit(&self) -> bool {
        !self.0.replace(true)
    }

    /// Whether a response has been claimed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.0.get()
    }
}

/// Logs failures and turns them into error envelopes.
#[derive(Clone, Debug)]
pub struct ErrorPipeline {
    logger: Logger,
}

impl ErrorPipeline {
    /// Create a pipeline writing through `logger`.
    #[must_use]
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Logger the pipeline writes to.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Log `failure` and build its response.
    ///
    /// Returns `None` when `latch` shows a response was already started; the
    /// failure is still logged.
    #[must_use]
    pub fn handle(&self, failure: &Failure, latch: &ResponseLatch) -> Option<HttpResponse> {
        self.record(failure);
        if !latch.commit() {
            self.logger.log(
                Severity::Debug,
                "response already started; failure logged without a second write",
            );
            return None;
        }
        Some(Self::respond(failure))
    }

    fn record(&self, failure: &Failure) {
        match failure {
            Failure::Structured(error) => self.record_structured(error),
            Failure::Unclassified(raw) => self.record_unclassified(raw),
        }
    }

    fn record_structured(&self, error: &Error) {
        let severity = if error.is_operational() {
            Severity::Error
        } else {
            Severity::Fatal
        };
        let payload = serde_json::to_value(error.to_log_payload())
            .unwrap_or_else(|err| json!({ "code": error.code(), "serialisation": err.to_string() }));
        self.logger.log_with(severity, error.message(), &payload);
    }

    fn record_unclassified(&self, raw: &UnclassifiedFailure) {
        let mut payload = json!({
            "error": raw.description(),
            "debug": raw.debug(),
        });
        if let (Some(id), Value::Object(map)) = (raw.trace_id(), &mut payload) {
            map.insert("traceId".to_owned(), Value::from(id));
        }
        self.logger
            .log_with(Severity::Fatal, "unclassified failure", &payload);
    }

    fn respond(failure: &Failure) -> HttpResponse {
        let envelope = failure.client_envelope();
        let trace_id = envelope.error.trace_id.clone();
        envelope_response(failure.http_status(), &envelope, trace_id.as_deref())
    }
}
