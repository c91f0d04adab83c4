//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use super::session::{SESSION_COOKIE_NAME, session_middleware};
use super::state::{HttpState, HttpStatePorts};
use crate::logging::{Logger, Mode};
use crate::outbound::persistence::{
    MemoryAdoptionRepository, MemoryPetRepository, MemoryUserRepository,
};

/// Build a session middleware configured for tests.
///
/// Same cookie settings as production, with a fresh key per invocation and
/// the `Secure` flag off for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(Key::generate(), false)
}

/// Handler state over empty in-memory repositories and a silent logger.
pub fn memory_state() -> HttpState {
    let ports = HttpStatePorts {
        users: Arc::new(MemoryUserRepository::default()),
        pets: Arc::new(MemoryPetRepository::default()),
        adoptions: Arc::new(MemoryAdoptionRepository::default()),
    };
    let logger = Logger::builder(Mode::Development)
        .interactive_writer(std::io::sink)
        .build();
    HttpState::new(ports, logger).with_mock_seed(7)
}

/// The session cookie set on `res`.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie set")
        .into_owned()
}
