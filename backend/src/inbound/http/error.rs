//! HTTP adapter mapping for structured errors.
//!
//! Handlers return [`ApiResult`]; Actix turns the error into a response via
//! [`ResponseError`]. The [`ErrorBoundary`](crate::middleware::ErrorBoundary)
//! middleware later recognises the same error on the response, logs it, and
//! rebuilds the body through the pipeline, so the mapping here only has to
//! be correct, not logged.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError};

use crate::domain::{Error, ErrorEnvelope, Failure, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Render an error envelope with its status and trace header.
pub(crate) fn envelope_response(
    status: u16,
    envelope: &ErrorEnvelope,
    trace_id: Option<&str>,
) -> HttpResponse {
    let mut response = HttpResponse::build(status_for(status)).json(envelope);
    if let Some(value) = trace_id.and_then(|id| HeaderValue::from_str(id).ok()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
    response
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.http_status())
    }

    fn error_response(&self) -> HttpResponse {
        envelope_response(self.http_status(), &self.to_client_envelope(), self.trace_id())
    }
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        status_for(self.http_status())
    }

    fn error_response(&self) -> HttpResponse {
        let envelope = self.client_envelope();
        let trace_id = envelope.error.trace_id.clone();
        envelope_response(self.http_status(), &envelope, trace_id.as_deref())
    }
}
