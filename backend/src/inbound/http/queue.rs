//! Queue API handlers.
//!
//! ```text
//! POST /createUser   {"name":"Ana","email":"ana@x.com","gender":"F"}
//! POST /addToLine    {"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}
//! POST /findPosition {"email":"ana@x.com"}
//! POST /showLine
//! POST /filterLine   {"gender":"F"}
//! POST /popLine
//! ```
//!
//! Every success answers `201 Created`. Positions are returned as a plain
//! text integer; everything else is JSON.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LineEntry, NewUser, Position, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_email, parse_gender, parse_user_id, user_validation_error,
};

/// Registration body for `POST /createUser`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    #[schema(example = "ana@x.com")]
    pub email: Option<String>,
    #[schema(example = "F")]
    pub gender: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        NewUser::try_from_parts(value.name, value.email, value.gender)
            .map_err(user_validation_error)
    }
}

/// Admission body for `POST /addToLine`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddToLineRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Option<String>,
}

/// Lookup body for `POST /findPosition`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FindPositionRequest {
    #[schema(example = "ana@x.com")]
    pub email: Option<String>,
}

/// Filter body for `POST /filterLine`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FilterLineRequest {
    #[schema(example = "M")]
    pub gender: Option<String>,
}

fn created_position(position: Position) -> HttpResponse {
    HttpResponse::Created()
        .content_type(ContentType::plaintext())
        .body(position.to_string())
}

/// Register a user under a freshly generated identifier.
#[utoipa::path(
    post,
    path = "/createUser",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Missing field, invalid email or duplicate user", body = Error),
        (status = 503, description = "Directory store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["queue"],
    operation_id = "createUser"
)]
#[post("/createUser")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let details = NewUser::try_from(payload.into_inner())?;
    let user = state.registration.register(details).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Admit a registered user at the tail of the line.
#[utoipa::path(
    post,
    path = "/addToLine",
    request_body = AddToLineRequest,
    responses(
        (status = 201, description = "Position of the admitted user", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing id, unknown user or already in line", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["queue"],
    operation_id = "addToLine"
)]
#[post("/addToLine")]
pub async fn add_to_line(
    state: web::Data<HttpState>,
    payload: web::Json<AddToLineRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(payload.into_inner().id)?;
    let position = state.line.admit(&id).await?;
    Ok(created_position(position))
}

/// Look up the position of a waiting user by email.
#[utoipa::path(
    post,
    path = "/findPosition",
    request_body = FindPositionRequest,
    responses(
        (status = 201, description = "Current position", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing or invalid email, or email not in line", body = Error),
        (status = 503, description = "Line store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["queue"],
    operation_id = "findPosition"
)]
#[post("/findPosition")]
pub async fn find_position(
    state: web::Data<HttpState>,
    payload: web::Json<FindPositionRequest>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(payload.into_inner().email)?;
    let position = state.line_query.position_of(&email).await?;
    Ok(created_position(position))
}

/// List every waiting user with their position, head first.
#[utoipa::path(
    post,
    path = "/showLine",
    responses(
        (status = 201, description = "Annotated line", body = [LineEntry]),
        (status = 400, description = "Line is empty", body = Error),
        (status = 503, description = "Line store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["queue"],
    operation_id = "showLine"
)]
#[post("/showLine")]
pub async fn show_line(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = state.line_query.list().await?;
    Ok(HttpResponse::Created().json(entries))
}

/// List waiting users of one gender, keeping their unfiltered positions.
#[utoipa::path(
    post,
    path = "/filterLine",
    request_body = FilterLineRequest,
    responses(
        (status = 201, description = "Filtered line", body = [LineEntry]),
        (status = 400, description = "Missing gender, empty line or no match", body = Error),
        (status = 503, description = "Line store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["queue"],
    operation_id = "filterLine"
)]
#[post("/filterLine")]
pub async fn filter_line(
    state: web::Data<HttpState>,
    payload: web::Json<FilterLineRequest>,
) -> ApiResult<HttpResponse> {
    let gender = parse_gender(payload.into_inner().gender)?;
    let entries = state.line_query.filter_by_gender(&gender).await?;
    Ok(HttpResponse::Created().json(entries))
}

/// Serve the head of the line.
#[utoipa::path(
    post,
    path = "/popLine",
    responses(
        (status = 201, description = "Removed user, including id", body = User),
        (status = 400, description = "Line is empty", body = Error),
        (status = 503, description = "Line store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["queue"],
    operation_id = "popLine"
)]
#[post("/popLine")]
pub async fn pop_line(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let served = state.line.pop_front().await?;
    Ok(HttpResponse::Created().json(served))
}

/// Register every queue endpoint on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use waitline::inbound::http::queue;
/// use waitline::inbound::http::state::HttpState;
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .configure(queue::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(add_to_line)
        .service(find_position)
        .service(show_line)
        .service(filter_line)
        .service(pop_line);
}

#[cfg(test)]
mod tests;
