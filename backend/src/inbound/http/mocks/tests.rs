//! Tests for mock data API handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use super::*;
use crate::domain::mocking_service::{MOCK_PET_COUNT, MOCK_USER_COUNT};
use crate::inbound::http::test_utils::memory_state;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(mocking_pets)
        .service(mocking_users)
        .service(generate_data)
}

async fn body_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

#[actix_web::test]
async fn mocking_pets_are_persisted() {
    let state = memory_state();
    let app = actix_test::init_service(test_app(state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/mocks/mockingpets")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    let pets = value["payload"].as_array().expect("pet list");
    assert_eq!(pets.len(), MOCK_PET_COUNT);
    assert!(pets.iter().all(|pet| pet["adopted"] == false));
    assert_eq!(state.pets.list().await.expect("pets").len(), MOCK_PET_COUNT);
}

#[actix_web::test]
async fn mocking_users_are_not_persisted() {
    let state = memory_state();
    let app = actix_test::init_service(test_app(state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/mocks/mockingusers")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    let users = value["payload"].as_array().expect("user list");
    assert_eq!(users.len(), MOCK_USER_COUNT);
    assert!(users.iter().all(|user| user.get("password").is_none()));
    assert!(state.users.list().await.expect("users").is_empty());
}

#[actix_web::test]
async fn generate_data_reports_counts() {
    let state = memory_state();
    let app = actix_test::init_service(test_app(state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/mocks/generateData")
            .set_json(json!({ "users": 3, "pets": 4 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["payload"], json!({ "users": 3, "pets": 4 }));
    assert_eq!(state.users.list().await.expect("users").len(), 3);
    assert_eq!(state.pets.list().await.expect("pets").len(), 4);
}

#[actix_web::test]
async fn generate_data_rejects_oversized_batches() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/mocks/generateData")
            .set_json(json!({ "users": 10_001 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let value = body_json(response).await;
    assert_eq!(value["error"]["code"], 42201);
    assert_eq!(value["error"]["details"][0]["requested"], 10_001);
}
