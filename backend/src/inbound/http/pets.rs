//! Pets API handlers.
//!
//! ```text
//! GET    /api/pets
//! POST   /api/pets {"name":"Puchini","specie":"dog","birthDate":"2021-01-15"}
//! PUT    /api/pets/{pid}
//! DELETE /api/pets/{pid}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ErrorEnvelope, NewPet, PetId, PetUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::schemas::{PetView, views};
use crate::inbound::http::state::HttpState;

/// Pet fields accepted by `POST /api/pets` and `PUT /api/pets/{pid}`.
///
/// Every field is optional on the wire; creation reports the missing
/// required ones together.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    #[schema(example = "Puchini")]
    pub name: Option<String>,
    #[schema(example = "dog")]
    pub specie: Option<String>,
    #[schema(example = "2021-01-15")]
    pub birth_date: Option<String>,
    pub image: Option<String>,
}

impl From<PetRequest> for NewPet {
    fn from(value: PetRequest) -> Self {
        Self {
            name: value.name,
            specie: value.specie,
            birth_date: value.birth_date,
            image: value.image,
        }
    }
}

impl From<PetRequest> for PetUpdate {
    fn from(value: PetRequest) -> Self {
        Self {
            name: value.name,
            specie: value.specie,
            birth_date: value.birth_date,
            image: value.image,
        }
    }
}

/// List every pet.
#[utoipa::path(
    get,
    path = "/api/pets",
    responses(
        (status = 200, description = "Pets", body = SuccessEnvelope<Vec<PetView>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["pets"],
    operation_id = "listPets"
)]
#[get("/api/pets")]
pub async fn list_pets(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let pets = state.pets.list().await?;
    Ok(SuccessEnvelope::payload(views::<_, PetView>(&pets)).into_response())
}

/// List a new pet for adoption.
#[utoipa::path(
    post,
    path = "/api/pets",
    request_body = PetRequest,
    responses(
        (status = 200, description = "Pet created", body = SuccessEnvelope<PetView>),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 422, description = "Invalid field", body = ErrorEnvelope)
    ),
    tags = ["pets"],
    operation_id = "createPet"
)]
#[post("/api/pets")]
pub async fn create_pet(
    state: web::Data<HttpState>,
    payload: web::Json<PetRequest>,
) -> ApiResult<HttpResponse> {
    let pet = state.pets.create(payload.into_inner().into()).await?;
    Ok(SuccessEnvelope::payload(PetView::from(&pet)).into_response())
}

/// Apply a partial update to a pet.
#[utoipa::path(
    put,
    path = "/api/pets/{pid}",
    params(("pid" = String, Path, description = "Pet id")),
    request_body = PetRequest,
    responses(
        (status = 200, description = "Pet updated", body = SuccessEnvelope<PetView>),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown pet", body = ErrorEnvelope),
        (status = 422, description = "Invalid field", body = ErrorEnvelope)
    ),
    tags = ["pets"],
    operation_id = "updatePet"
)]
#[put("/api/pets/{pid}")]
pub async fn update_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PetRequest>,
) -> ApiResult<HttpResponse> {
    let id = PetId::parse(&path)?;
    let pet = state.pets.update(&id, payload.into_inner().into()).await?;
    Ok(SuccessEnvelope::payload(PetView::from(&pet))
        .with_message("pet updated")
        .into_response())
}

/// Remove a pet.
#[utoipa::path(
    delete,
    path = "/api/pets/{pid}",
    params(("pid" = String, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet deleted", body = Object),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown pet", body = ErrorEnvelope)
    ),
    tags = ["pets"],
    operation_id = "deletePet"
)]
#[delete("/api/pets/{pid}")]
pub async fn delete_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = PetId::parse(&path)?;
    state.pets.delete(&id).await?;
    Ok(SuccessEnvelope::message("pet deleted").into_response())
}
