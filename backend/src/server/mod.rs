//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use adoptme_backend::Trace;
#[cfg(debug_assertions)]
use adoptme_backend::doc::ApiDoc;
use adoptme_backend::inbound::http::pipeline::ErrorPipeline;
use adoptme_backend::inbound::http::routes::{configure, not_found};
use adoptme_backend::inbound::http::session::session_middleware;
use adoptme_backend::inbound::http::state::{HttpState, HttpStatePorts};
use adoptme_backend::logging::Logger;
use adoptme_backend::middleware::{ErrorBoundary, RequestLog};
use adoptme_backend::outbound::persistence::{
    MemoryAdoptionRepository, MemoryPetRepository, MemoryUserRepository,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    logger: Logger,
    key: Key,
    cookie_secure: bool,
}

fn build_http_state(logger: &Logger) -> HttpState {
    let ports = HttpStatePorts {
        users: Arc::new(MemoryUserRepository::default()),
        pets: Arc::new(MemoryPetRepository::default()),
        adoptions: Arc::new(MemoryAdoptionRepository::default()),
    };
    HttpState::new(ports, logger.clone())
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        logger,
        key,
        cookie_secure,
    } = deps;

    let app = App::new()
        .app_data(http_state)
        .wrap(session_middleware(key, cookie_secure))
        .wrap(ErrorBoundary::new(ErrorPipeline::new(logger.clone())))
        .wrap(RequestLog::new(logger))
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over in-memory repositories.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        workers,
        logger,
    } = config;
    let http_state = web::Data::new(build_http_state(&logger));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            logger: logger.clone(),
            key: key.clone(),
            cookie_secure,
        })
    });
    let server = match workers {
        Some(workers) => server.workers(workers),
        None => server,
    };
    Ok(server.bind(bind_addr)?.run())
}
