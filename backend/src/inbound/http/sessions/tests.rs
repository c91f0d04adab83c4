//! Tests for session API handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{memory_state, session_cookie, test_session_middleware};

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
        .wrap(test_session_middleware())
        .service(register)
        .service(login)
        .service(current)
        .service(logout)
}

async fn body_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

fn registration() -> Value {
    json!({
        "first_name": "Ana",
        "last_name": "Lopez",
        "email": "Ana@Example.com",
        "password": "secret",
    })
}

#[actix_web::test]
async fn register_login_current_logout() {
    let state = memory_state();
    let app = actix_test::init_service(test_app(state.clone())).await;

    let registered = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/sessions/register")
            .set_json(registration())
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::OK);
    let user_id = body_json(registered).await["payload"]
        .as_str()
        .expect("user id")
        .to_owned();

    let logged_in = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/sessions/login")
            .set_json(json!({ "email": "ana@example.com", "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(logged_in.status(), StatusCode::OK);
    let cookie = session_cookie(&logged_in);
    assert_eq!(
        body_json(logged_in).await,
        json!({ "status": "success", "message": "Logged in" })
    );

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/sessions/current")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(
        body_json(me).await["payload"],
        json!({ "name": "Ana Lopez", "email": "ana@example.com", "role": "user" })
    );

    let logged_out = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/sessions/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logged_out.status(), StatusCode::OK);

    let id = crate::domain::UserId::parse(&user_id).expect("valid id");
    let stored = state.users.get(&id).await.expect("user stored");
    assert!(stored.last_connection.is_some());
}

#[actix_web::test]
async fn register_rejects_a_taken_email() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/sessions/register")
                .set_json(registration())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), expected);
    }
}

#[rstest]
#[case(json!({ "email": "ana@example.com", "password": "wrong" }))]
#[case(json!({ "email": "nobody@example.com", "password": "secret" }))]
#[actix_web::test]
async fn login_failures_are_indistinguishable(#[case] credentials: Value) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/sessions/register")
            .set_json(registration())
            .to_request(),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/sessions/login")
            .set_json(credentials)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value = body_json(response).await;
    assert_eq!(value["error"]["code"], 40101);
    assert_eq!(value["error"]["details"], json!([]));
}

#[actix_web::test]
async fn current_without_a_session_is_unauthorised() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/sessions/current")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
