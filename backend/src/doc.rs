//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the six queue endpoints, the health probes and the
//! schemas they exchange. The document is served by Swagger UI in debug
//! builds and exported via `cargo run --bin openapi-dump` for tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, LineEntry, User};
use crate::inbound::http::queue::{
    AddToLineRequest, CreateUserRequest, FilterLineRequest, FindPositionRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Waitline API",
        description = "First-come-first-served waiting line for registered users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::queue::create_user,
        crate::inbound::http::queue::add_to_line,
        crate::inbound::http::queue::find_position,
        crate::inbound::http::queue::show_line,
        crate::inbound::http::queue::filter_line,
        crate::inbound::http::queue::pop_line,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        LineEntry,
        Error,
        ErrorCode,
        CreateUserRequest,
        AddToLineRequest,
        FindPositionRequest,
        FilterLineRequest,
    )),
    tags(
        (name = "queue", description = "Registration and waiting-line operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
