//! Port abstraction for waiting-line persistence.
//!
//! The stored collection is ordered head first. Positions are never
//! persisted; they are derived from order on every read.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by line repository adapters.
    pub enum LineRepositoryError {
        /// Backing store could not be reached.
        Connection { message: String } => "line store unavailable: {message}",
        /// Read or write failed during execution.
        Query { message: String } => "line store query failed: {message}",
        /// Stored content could not be encoded or decoded.
        Serialization { message: String } => "line store content invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LineRepository: Send + Sync {
    /// Waiting users, head first. A store that has never been written yields
    /// an empty line.
    async fn load(&self) -> Result<Vec<User>, LineRepositoryError>;

    /// Atomically replace the stored line with `entries`, preserving order.
    async fn replace(&self, entries: &[User]) -> Result<(), LineRepositoryError>;
}

/// Fixture repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLineRepository;

#[async_trait]
impl LineRepository for FixtureLineRepository {
    async fn load(&self) -> Result<Vec<User>, LineRepositoryError> {
        Ok(Vec::new())
    }

    async fn replace(&self, _entries: &[User]) -> Result<(), LineRepositoryError> {
        Ok(())
    }
}
