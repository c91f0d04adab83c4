//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{uid}
//! PUT    /api/users/{uid} {"first_name":"Ana","role":"admin"}
//! DELETE /api/users/{uid}
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ErrorEnvelope, UserId, UserUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::schemas::{UserView, views};
use crate::inbound::http::state::HttpState;

/// Partial update body for `PUT /api/users/{uid}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    #[schema(example = "admin")]
    pub role: Option<String>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            role: value.role,
        }
    }
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = SuccessEnvelope<Vec<UserView>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/api/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list().await?;
    Ok(SuccessEnvelope::payload(views::<_, UserView>(&users)).into_response())
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{uid}",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = SuccessEnvelope<UserView>),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/api/users/{uid}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::parse(&path)?;
    let user = state.users.get(&id).await?;
    Ok(SuccessEnvelope::payload(UserView::from(&user)).into_response())
}

/// Apply a partial update to a user.
#[utoipa::path(
    put,
    path = "/api/users/{uid}",
    params(("uid" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = SuccessEnvelope<UserView>),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope),
        (status = 409, description = "Email taken", body = ErrorEnvelope),
        (status = 422, description = "Invalid field", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/api/users/{uid}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = UserId::parse(&path)?;
    let user = state
        .users
        .update(&id, payload.into_inner().into())
        .await?;
    Ok(SuccessEnvelope::payload(UserView::from(&user))
        .with_message("User updated")
        .into_response())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{uid}",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = Object),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/api/users/{uid}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::parse(&path)?;
    state.users.delete(&id).await?;
    Ok(SuccessEnvelope::message("User deleted").into_response())
}
