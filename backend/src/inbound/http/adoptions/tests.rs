//! Tests for adoptions API handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use super::*;
use crate::domain::{NewPet, Pet, Registration, User};
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
        .service(list_adoptions)
        .service(get_adoption)
        .service(adopt_pet)
}

async fn body_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

async fn seed(state: &HttpState) -> (User, Pet) {
    let user = state
        .sessions
        .register(Registration {
            first_name: Some("Ana".to_owned()),
            last_name: Some("Lopez".to_owned()),
            email: Some("ana@example.com".to_owned()),
            password: Some("secret".to_owned()),
        })
        .await
        .expect("user registered");
    let pet = state
        .pets
        .create(NewPet {
            name: Some("Rex".to_owned()),
            specie: Some("dog".to_owned()),
            birth_date: Some("2020-05-01".to_owned()),
            image: None,
        })
        .await
        .expect("pet created");
    (user, pet)
}

#[actix_web::test]
async fn adoption_links_user_and_pet() {
    let state = memory_state();
    let (user, pet) = seed(&state).await;
    let app = actix_test::init_service(test_app(state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/adoptions/{}/{}", user.id, pet.id))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value["message"], "Pet adopted");
    assert_eq!(value["payload"]["owner"], user.id.to_string());
    assert_eq!(value["payload"]["pet"], pet.id.to_string());

    let adoption_id = value["payload"]["_id"].as_str().expect("adoption id").to_owned();
    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/adoptions/{adoption_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);

    let stored_pet = state.pets.list().await.expect("pets");
    assert!(stored_pet[0].adopted);
    assert_eq!(stored_pet[0].owner, Some(user.id));
    let stored_user = state.users.get(&user.id).await.expect("user");
    assert_eq!(stored_user.pets, vec![pet.id]);
}

#[actix_web::test]
async fn adopting_twice_is_an_inconsistent_state() {
    let state = memory_state();
    let (user, pet) = seed(&state).await;
    let app = actix_test::init_service(test_app(state)).await;
    let uri = format!("/api/adoptions/{}/{}", user.id, pet.id);

    let first =
        actix_test::call_service(&app, actix_test::TestRequest::post().uri(&uri).to_request())
            .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second =
        actix_test::call_service(&app, actix_test::TestRequest::post().uri(&uri).to_request())
            .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(second).await["error"]["code"], 40020);
}

#[actix_web::test]
async fn unknown_pet_is_not_found() {
    let state = memory_state();
    let (user, _) = seed(&state).await;
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/adoptions/{}/60d0fe4f5311236168a109ca", user.id))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let value = body_json(response).await;
    assert_eq!(value["error"]["code"], 40401);
}
