//! Shared helpers for backend integration tests.
//!
//! Builds the application exactly as the server does (session, error
//! boundary, request log, trace) over in-memory repositories, with the
//! logger writing into memory so tests can inspect both sinks.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use adoptme_backend::Trace;
use adoptme_backend::inbound::http::pipeline::ErrorPipeline;
use adoptme_backend::inbound::http::routes::{configure, not_found};
use adoptme_backend::inbound::http::session::{SESSION_COOKIE_NAME, session_middleware};
use adoptme_backend::inbound::http::state::{HttpState, HttpStatePorts};
use adoptme_backend::logging::Mode;
use adoptme_backend::logging::test_support::{CapturedLogs, capturing_logger};
use adoptme_backend::middleware::{ErrorBoundary, RequestLog};
use adoptme_backend::outbound::persistence::{
    MemoryAdoptionRepository, MemoryPetRepository, MemoryUserRepository,
};

/// Everything a test needs to drive the app and inspect its logs.
pub struct Harness {
    pub state: HttpState,
    pub logs: CapturedLogs,
    key: Key,
}

impl Harness {
    /// Fresh in-memory state with a capturing logger in `mode`.
    pub fn new(mode: Mode) -> Self {
        let (logger, logs) = capturing_logger(mode);
        let ports = HttpStatePorts {
            users: Arc::new(MemoryUserRepository::default()),
            pets: Arc::new(MemoryPetRepository::default()),
            adoptions: Arc::new(MemoryAdoptionRepository::default()),
        };
        Self {
            state: HttpState::new(ports, logger).with_mock_seed(42),
            logs,
            key: Key::generate(),
        }
    }

    /// The production middleware stack around every route, plus `extra`.
    ///
    /// The app owns clones of the harness state, so it does not borrow
    /// `self` and can be handed to `init_service`.
    pub fn app<F>(
        &self,
        extra: F,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<F>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<F>,
    >
    where
        F: FnOnce(&mut web::ServiceConfig),
    {
        let logger = self.state.logger.clone();
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(session_middleware(self.key.clone(), false))
            .wrap(ErrorBoundary::new(ErrorPipeline::new(logger.clone())))
            .wrap(RequestLog::new(logger))
            .wrap(Trace)
            .configure(configure)
            .configure(extra)
            .default_service(web::to(not_found))
    }
}

/// No extra routes.
pub fn no_extra_routes(_: &mut web::ServiceConfig) {}

/// The session cookie on `res`, if one was set.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.into_owned())
}
