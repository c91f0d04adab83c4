//! Adoptions API handlers.
//!
//! ```text
//! GET  /api/adoptions
//! GET  /api/adoptions/{aid}
//! POST /api/adoptions/{uid}/{pid}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{AdoptionId, ErrorEnvelope, PetId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::schemas::{AdoptionView, views};
use crate::inbound::http::state::HttpState;

/// List every adoption.
#[utoipa::path(
    get,
    path = "/api/adoptions",
    responses(
        (status = 200, description = "Adoptions", body = SuccessEnvelope<Vec<AdoptionView>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["adoptions"],
    operation_id = "listAdoptions"
)]
#[get("/api/adoptions")]
pub async fn list_adoptions(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let adoptions = state.adoptions.list().await?;
    Ok(SuccessEnvelope::payload(views::<_, AdoptionView>(&adoptions)).into_response())
}

/// Fetch one adoption.
#[utoipa::path(
    get,
    path = "/api/adoptions/{aid}",
    params(("aid" = String, Path, description = "Adoption id")),
    responses(
        (status = 200, description = "Adoption", body = SuccessEnvelope<AdoptionView>),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown adoption", body = ErrorEnvelope)
    ),
    tags = ["adoptions"],
    operation_id = "getAdoption"
)]
#[get("/api/adoptions/{aid}")]
pub async fn get_adoption(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = AdoptionId::parse(&path)?;
    let adoption = state.adoptions.get(&id).await?;
    Ok(SuccessEnvelope::payload(AdoptionView::from(&adoption)).into_response())
}

/// Record a user adopting a pet.
#[utoipa::path(
    post,
    path = "/api/adoptions/{uid}/{pid}",
    params(
        ("uid" = String, Path, description = "Adopting user id"),
        ("pid" = String, Path, description = "Pet id")
    ),
    responses(
        (status = 200, description = "Pet adopted", body = SuccessEnvelope<AdoptionView>),
        (status = 400, description = "Malformed id or pet already adopted", body = ErrorEnvelope),
        (status = 404, description = "Unknown user or pet", body = ErrorEnvelope)
    ),
    tags = ["adoptions"],
    operation_id = "adoptPet"
)]
#[post("/api/adoptions/{uid}/{pid}")]
pub async fn adopt_pet(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (uid, pid) = path.into_inner();
    let user_id = UserId::parse(&uid)?;
    let pet_id = PetId::parse(&pid)?;
    let adoption = state.adoptions.adopt(&user_id, &pet_id).await?;
    Ok(SuccessEnvelope::payload(AdoptionView::from(&adoption))
        .with_message("Pet adopted")
        .into_response())
}

#[cfg(test)]
mod tests;
