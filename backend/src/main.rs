//! Backend entry-point: resolves settings, starts the logger, and serves
//! the REST API.
//!
//! Configuration problems (an unset or unknown mode, an unusable log file,
//! a missing production session key) abort startup with a `fatal` record on
//! stderr and a non-zero exit status.

mod server;

use adoptme_backend::domain::Error;
use adoptme_backend::logging::{Logger, Mode, Severity, install_panic_hook};
use adoptme_backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use serde_json::json;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let settings = AppSettings::load()?;

    let mode = settings.mode().map_err(abort_startup)?;
    let logger = Logger::open(mode, &settings.log_file()).map_err(abort_startup)?;
    if let Err(error) = logger.install_global() {
        logger.warning(&format!("global subscriber already installed: {error}"));
    }
    install_panic_hook(logger.clone());

    let bind_addr = settings.bind_addr().map_err(abort_startup)?;
    let key = settings.session_key(mode).map_err(abort_startup)?;
    let startup = match mode {
        Mode::Development => Severity::Debug,
        Mode::Production => Severity::Info,
    };
    logger.log_with(
        startup,
        &format!("Logger initialized in {mode} mode on port {}", bind_addr.port()),
        &json!({ "bind": bind_addr.to_string(), "logFile": settings.log_file() }),
    );

    let config = ServerConfig::new(key, settings.cookie_secure(mode), bind_addr, logger.clone())
        .with_workers(settings.workers);
    let bound = config.bind_addr();
    let server = create_server(config).map_err(|error| {
        logger.fatal(
            "failed to bind HTTP listener",
            &json!({ "bind": bound.to_string(), "error": error.to_string() }),
        );
        error
    })?;
    server.await?;
    logger.info("server stopped");
    Ok(())
}

/// Report a configuration error at `fatal` on stderr before any file sink
/// exists, then hand it back for the exit status.
fn abort_startup(error: Error) -> color_eyre::Report {
    let console = Logger::builder(Mode::Production)
        .interactive_writer(std::io::stderr)
        .build();
    let payload = serde_json::to_value(error.to_log_payload())
        .unwrap_or_else(|_| json!({ "code": error.code() }));
    console.fatal("startup aborted", &payload);
    color_eyre::Report::new(error)
}
