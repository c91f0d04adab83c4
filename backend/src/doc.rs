//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every handler under `inbound::http`
//! - **Schemas**: the error envelope and the document views
//! - **Security**: the `coderCookie` session cookie
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ErrorBody, ErrorEnvelope};
use crate::inbound::http::mocks::GenerateDataRequest;
use crate::inbound::http::pets::PetRequest;
use crate::inbound::http::schemas::{
    AdoptionView, CurrentUserView, GeneratedCountsView, PetView, UserView,
};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::sessions::{LoginRequest, RegisterRequest};
use crate::inbound::http::users::UpdateUserRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Encrypted session cookie issued by POST /api/sessions/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "AdoptMe backend API",
        description = "Pet adoption REST API. Every failure answers with the same error envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::pets::list_pets,
        crate::inbound::http::pets::create_pet,
        crate::inbound::http::pets::update_pet,
        crate::inbound::http::pets::delete_pet,
        crate::inbound::http::adoptions::list_adoptions,
        crate::inbound::http::adoptions::get_adoption,
        crate::inbound::http::adoptions::adopt_pet,
        crate::inbound::http::sessions::register,
        crate::inbound::http::sessions::login,
        crate::inbound::http::sessions::current,
        crate::inbound::http::sessions::logout,
        crate::inbound::http::mocks::mocking_pets,
        crate::inbound::http::mocks::mocking_users,
        crate::inbound::http::mocks::generate_data,
        crate::inbound::http::diagnostics::logger_test,
        crate::inbound::http::diagnostics::error_test,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorBody,
        UserView,
        PetView,
        AdoptionView,
        CurrentUserView,
        GeneratedCountsView,
        UpdateUserRequest,
        PetRequest,
        RegisterRequest,
        LoginRequest,
        GenerateDataRequest,
    )),
    tags(
        (name = "users", description = "User administration"),
        (name = "pets", description = "Pets listed for adoption"),
        (name = "adoptions", description = "Adoption records"),
        (name = "sessions", description = "Registration and cookie sessions"),
        (name = "mocks", description = "Fake data generation"),
        (name = "diagnostics", description = "Logger and error pipeline checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_envelope_schema_has_status_and_error() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let envelope = schemas.get("ErrorEnvelope").expect("ErrorEnvelope schema");
        assert_object_schema_has_field(envelope, "status");
        assert_object_schema_has_field(envelope, "error");

        let body = schemas.get("ErrorBody").expect("ErrorBody schema");
        assert_object_schema_has_field(body, "code");
        assert_object_schema_has_field(body, "message");
        assert_object_schema_has_field(body, "details");
    }

    #[test]
    fn user_view_schema_never_exposes_passwords() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserView").expect("UserView schema");
        assert_object_schema_has_field(user, "_id");
        assert_object_schema_has_field(user, "email");
        match user {
            RefOr::T(Schema::Object(obj)) => assert!(!obj.properties.contains_key("password")),
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/users",
            "/api/users/{uid}",
            "/api/pets",
            "/api/pets/{pid}",
            "/api/adoptions",
            "/api/adoptions/{aid}",
            "/api/adoptions/{uid}/{pid}",
            "/api/sessions/register",
            "/api/sessions/login",
            "/api/sessions/current",
            "/api/sessions/logout",
            "/api/mocks/mockingpets",
            "/api/mocks/mockingusers",
            "/api/mocks/generateData",
            "/loggerTest",
            "/errorTest",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
