//! Port abstraction for registered-user persistence.
//!
//! The directory is persisted as a whole snapshot: adapters load every record
//! and replace the stored collection in one step. Callers serialise
//! read-modify-write cycles themselves.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by directory repository adapters.
    pub enum DirectoryRepositoryError {
        /// Backing store could not be reached.
        Connection { message: String } => "directory store unavailable: {message}",
        /// Read or write failed during execution.
        Query { message: String } => "directory store query failed: {message}",
        /// Stored content could not be encoded or decoded.
        Serialization { message: String } => "directory store content invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Every registered user in registration order. A store that has never
    /// been written yields an empty collection.
    async fn load(&self) -> Result<Vec<User>, DirectoryRepositoryError>;

    /// Atomically replace the stored collection with `records`.
    async fn replace(&self, records: &[User]) -> Result<(), DirectoryRepositoryError>;
}

/// Fixture repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryRepository;

#[async_trait]
impl DirectoryRepository for FixtureDirectoryRepository {
    async fn load(&self) -> Result<Vec<User>, DirectoryRepositoryError> {
        Ok(Vec::new())
    }

    async fn replace(&self, _records: &[User]) -> Result<(), DirectoryRepositoryError> {
        Ok(())
    }
}
