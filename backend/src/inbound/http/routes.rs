//! Route table for the REST API.
//!
//! ```text
//! /api/users      users.rs
//! /api/pets       pets.rs
//! /api/adoptions  adoptions.rs
//! /api/sessions   sessions.rs
//! /api/mocks      mocks.rs
//! /loggerTest, /errorTest  diagnostics.rs
//! ```
//!
//! Unknown routes and malformed JSON bodies raise structured errors like
//! any handler, so they reach the error pipeline too.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::domain::{Error, ErrorKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::{adoptions, diagnostics, mocks, pets, sessions, users};

/// Register every handler and the JSON body configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use adoptme_backend::inbound::http::routes::{configure, not_found};
///
/// let app = App::new()
///     .configure(configure)
///     .default_service(web::to(not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(pets::list_pets)
        .service(pets::create_pet)
        .service(pets::update_pet)
        .service(pets::delete_pet)
        .service(adoptions::list_adoptions)
        .service(adoptions::get_adoption)
        .service(adoptions::adopt_pet)
        .service(sessions::register)
        .service(sessions::login)
        .service(sessions::current)
        .service(sessions::logout)
        .service(mocks::mocking_pets)
        .service(mocks::mocking_users)
        .service(mocks::generate_data)
        .service(diagnostics::logger_test)
        .service(diagnostics::error_test);
}

/// JSON extractor settings: unreadable bodies raise `VALIDATION_ERROR`.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::new(ErrorKind::ValidationError)
            .with_detail(err.to_string())
            .into()
    })
}

/// Fallback for unmatched routes: `RESOURCE_NOT_FOUND`.
///
/// # Errors
/// Always.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(json!({
        "method": req.method().as_str(),
        "path": req.path(),
    })))
}
