//! Session API handlers.
//!
//! ```text
//! POST /api/sessions/register {"first_name":"Ana","last_name":"Lopez","email":"ana@example.com","password":"secret"}
//! POST /api/sessions/login {"email":"ana@example.com","password":"secret"}
//! GET  /api/sessions/current
//! POST /api/sessions/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ErrorEnvelope, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::schemas::CurrentUserView;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/sessions/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ana")]
    pub first_name: Option<String>,
    #[schema(example = "Lopez")]
    pub last_name: Option<String>,
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(value: RegisterRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            password: value.password,
        }
    }
}

/// Login body for `POST /api/sessions/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create an account; the payload is the new user id.
#[utoipa::path(
    post,
    path = "/api/sessions/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = SuccessEnvelope<String>),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 409, description = "Email taken", body = ErrorEnvelope),
        (status = 422, description = "Invalid field", body = ErrorEnvelope)
    ),
    tags = ["sessions"],
    operation_id = "register",
    security([])
)]
#[post("/api/sessions/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.sessions.register(payload.into_inner().into()).await?;
    Ok(SuccessEnvelope::payload(user.id.to_string()).into_response())
}

/// Check credentials and open a session.
#[utoipa::path(
    post,
    path = "/api/sessions/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = Object,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope)
    ),
    tags = ["sessions"],
    operation_id = "login",
    security([])
)]
#[post("/api/sessions/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let user = state.sessions.login(email, password).await?;
    session.persist_user(&user.id)?;
    Ok(SuccessEnvelope::message("Logged in").into_response())
}

/// The user behind the session cookie.
#[utoipa::path(
    get,
    path = "/api/sessions/current",
    responses(
        (status = 200, description = "Current user", body = SuccessEnvelope<CurrentUserView>),
        (status = 401, description = "No valid session", body = ErrorEnvelope)
    ),
    tags = ["sessions"],
    operation_id = "currentUser"
)]
#[get("/api/sessions/current")]
pub async fn current(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let id = session.require_user_id()?;
    let user = state.sessions.current(&id).await?;
    Ok(SuccessEnvelope::payload(CurrentUserView::from(&user)).into_response())
}

/// Close the session.
#[utoipa::path(
    post,
    path = "/api/sessions/logout",
    responses(
        (status = 200, description = "Logged out", body = Object)
    ),
    tags = ["sessions"],
    operation_id = "logout"
)]
#[post("/api/sessions/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(id) = session.user_id()? {
        state.sessions.logout(&id).await?;
    }
    session.clear();
    Ok(SuccessEnvelope::message("Logged out").into_response())
}

#[cfg(test)]
mod tests;
