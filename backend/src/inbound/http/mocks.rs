//! Mock data API handlers.
//!
//! ```text
//! GET  /api/mocks/mockingpets
//! GET  /api/mocks/mockingusers
//! POST /api/mocks/generateData {"users":10,"pets":20}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ErrorEnvelope;
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::schemas::{GeneratedCountsView, PetView, UserView, views};
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/mocks/generateData`; absent counts mean zero.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GenerateDataRequest {
    #[serde(default)]
    #[schema(example = 10)]
    pub users: usize,
    #[serde(default)]
    #[schema(example = 20)]
    pub pets: usize,
}

/// Generate and store a batch of fake pets.
#[utoipa::path(
    get,
    path = "/api/mocks/mockingpets",
    responses(
        (status = 200, description = "Generated pets", body = SuccessEnvelope<Vec<PetView>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["mocks"],
    operation_id = "mockingPets"
)]
#[get("/api/mocks/mockingpets")]
pub async fn mocking_pets(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let pets = state.mocks.mock_pets().await?;
    Ok(SuccessEnvelope::payload(views::<_, PetView>(&pets)).into_response())
}

/// Generate fake users without storing them.
#[utoipa::path(
    get,
    path = "/api/mocks/mockingusers",
    responses(
        (status = 200, description = "Generated users", body = SuccessEnvelope<Vec<UserView>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["mocks"],
    operation_id = "mockingUsers"
)]
#[get("/api/mocks/mockingusers")]
pub async fn mocking_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.mocks.mock_users()?;
    Ok(SuccessEnvelope::payload(views::<_, UserView>(&users)).into_response())
}

/// Generate and store the requested numbers of users and pets.
#[utoipa::path(
    post,
    path = "/api/mocks/generateData",
    request_body = GenerateDataRequest,
    responses(
        (status = 200, description = "Stored counts", body = SuccessEnvelope<GeneratedCountsView>),
        (status = 422, description = "Batch too large or malformed body", body = ErrorEnvelope)
    ),
    tags = ["mocks"],
    operation_id = "generateData"
)]
#[post("/api/mocks/generateData")]
pub async fn generate_data(
    state: web::Data<HttpState>,
    payload: web::Json<GenerateDataRequest>,
) -> ApiResult<HttpResponse> {
    let GenerateDataRequest { users, pets } = payload.into_inner();
    let counts = state.mocks.generate(users, pets).await?;
    Ok(SuccessEnvelope::payload(GeneratedCountsView::from(counts))
        .with_message("Mock data generated")
        .into_response())
}

#[cfg(test)]
mod tests;
