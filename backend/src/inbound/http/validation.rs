//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive with every field optional so absence can be
//! reported per field instead of as an opaque deserialisation failure.

use actix_web::{HttpRequest, ResponseError, error::InternalError, web};
use serde_json::json;

use crate::domain::{EmailAddress, Error, Gender, UserId, UserValidationError};

/// Validation detail codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEmail,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Map a value-construction failure to the client-facing error.
pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    let field = err.field();
    if err.is_missing_field() {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "code": ErrorCode::MissingField.as_str(),
        }))
    } else {
        Error::invalid_email().with_details(json!({
            "field": field,
            "code": ErrorCode::InvalidEmail.as_str(),
        }))
    }
}

pub(crate) fn parse_user_id(value: Option<String>) -> Result<UserId, Error> {
    value
        .ok_or(UserValidationError::MissingId)
        .and_then(UserId::new)
        .map_err(user_validation_error)
}

pub(crate) fn parse_email(value: Option<String>) -> Result<EmailAddress, Error> {
    value
        .ok_or(UserValidationError::MissingEmail)
        .and_then(EmailAddress::new)
        .map_err(user_validation_error)
}

pub(crate) fn parse_gender(value: Option<String>) -> Result<Gender, Error> {
    value
        .ok_or(UserValidationError::MissingGender)
        .and_then(Gender::new)
        .map_err(user_validation_error)
}

/// JSON extractor configuration reporting unreadable bodies as
/// `invalid_request` rather than the framework's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = Error::invalid_request(format!("request body is not valid JSON: {err}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }));
    InternalError::from_response(err, error.error_response()).into()
}
