//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define the strongly typed waiting-line model shared by the API
//! and persistence layers. Types are immutable once constructed; invariants
//! and serialisation contracts (serde) live in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) - API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) - stable error identifier.
//! - User (alias to `user::User`) - registered user record.
//! - Directory (alias to `directory::Directory`) - registered-user set.
//! - Line (alias to `line::Line`) - FIFO sequence of waiting users.
//! - LineService (alias to `line_service::LineService`) - use-case service
//!   implementing the driving ports.

pub mod directory;
pub mod error;
pub mod line;
pub mod line_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::directory::{Directory, DirectoryError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::line::{Line, LineEntry, LineError, Position};
pub use self::line_service::LineService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, Gender, NewUser, User, UserId, UserName, UserValidationError,
    is_valid_email_syntax,
};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use waitline::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::empty_line())
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
