//! Diagnostic endpoints for checking the logger and the error pipeline.
//!
//! ```text
//! GET /loggerTest
//! GET /errorTest
//! ```

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::domain::{Error, ErrorEnvelope, ErrorKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::logging::Severity;

/// Plain-text reply of `GET /loggerTest`.
pub const LOGGER_TEST_REPLY: &str = "Logger test completed. Check your console and errors.log file.";

/// Emit one record at every severity.
#[utoipa::path(
    get,
    path = "/loggerTest",
    responses((status = 200, description = "Records emitted", body = String, content_type = "text/plain")),
    tags = ["diagnostics"],
    operation_id = "loggerTest"
)]
#[get("/loggerTest")]
pub async fn logger_test(state: web::Data<HttpState>) -> HttpResponse {
    for severity in Severity::ALL.into_iter().rev() {
        state
            .logger
            .log(severity, &format!("{} log test", severity.label()));
    }
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LOGGER_TEST_REPLY)
}

/// Fail with a structured error carrying two details.
#[utoipa::path(
    get,
    path = "/errorTest",
    responses((status = 400, description = "Always fails", body = ErrorEnvelope)),
    tags = ["diagnostics"],
    operation_id = "errorTest"
)]
#[get("/errorTest")]
pub async fn error_test() -> ApiResult<HttpResponse> {
    Err(Error::new(ErrorKind::DependencyNotFound).with_details([
        json!("dependency could not be located"),
        json!({ "dependency": "example-service" }),
    ]))
}
