//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use waitline::Trace;
#[cfg(debug_assertions)]
use waitline::doc::ApiDoc;
use waitline::domain::LineService;
use waitline::inbound::http::health::{HealthState, live, ready};
use waitline::inbound::http::queue;
use waitline::inbound::http::state::HttpState;
use waitline::inbound::http::validation::json_config;
use waitline::outbound::persistence::{JsonDirectoryRepository, JsonLineRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Wire the JSON-file repositories under `config.data_dir` into the line
/// service and expose it through every driving port.
///
/// # Errors
/// Returns [`std::io::Error`] when the data directory cannot be created or
/// opened.
fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let directory = JsonDirectoryRepository::open(config.data_dir())?;
    let line = JsonLineRepository::open(config.data_dir())?;
    info!(
        users = %directory.path().display(),
        line = %line.path().display(),
        "opened collection files"
    );
    let service = Arc::new(LineService::new(Arc::new(directory), Arc::new(line)));
    Ok(web::Data::new(HttpState::from_service(service)))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .configure(queue::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: resolved [`ServerConfig`] naming the bind address and data directory.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when opening the data directory or binding
/// the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    info!(bind_addr = %config.bind_addr(), "server listening");
    Ok(server)
}
