//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`UserRegistration`, `DirectoryQuery`, `LineCommand`,
//! `LineQuery`) are what inbound adapters call. Driven ports
//! (`DirectoryRepository`, `LineRepository`) are what outbound adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod directory_query;
mod directory_repository;
mod line_command;
mod line_query;
mod line_repository;
mod user_registration;

#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::{DirectoryQuery, FixtureDirectoryQuery};
#[cfg(test)]
pub use directory_repository::MockDirectoryRepository;
pub use directory_repository::{
    DirectoryRepository, DirectoryRepositoryError, FixtureDirectoryRepository,
};
#[cfg(test)]
pub use line_command::MockLineCommand;
pub use line_command::{FixtureLineCommand, LineCommand};
#[cfg(test)]
pub use line_query::MockLineQuery;
pub use line_query::{FixtureLineQuery, LineQuery};
#[cfg(test)]
pub use line_repository::MockLineRepository;
pub use line_repository::{FixtureLineRepository, LineRepository, LineRepositoryError};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{FixtureUserRegistration, UserRegistration};
