//! Driving port for read-only directory lookups.
//!
//! This is a library-level API: no HTTP route exposes it, and `HttpState`
//! does not carry it. Admission does not go through this port either.
//! `LineService::admit` needs the full record to snapshot into the line, so
//! it reads the directory snapshot directly.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, User, UserId};

/// Domain use-case port for directory reads. Lookups never mutate state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Whether a user with `id` is registered.
    async fn exists(&self, id: &UserId) -> Result<bool, Error>;

    /// The registered user owning `email`, if any.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, Error>;
}

/// Fixture query over an empty directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryQuery;

#[async_trait]
impl DirectoryQuery for FixtureDirectoryQuery {
    async fn exists(&self, _id: &UserId) -> Result<bool, Error> {
        Ok(false)
    }

    async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<User>, Error> {
        Ok(None)
    }
}
