//! Driving port for registering users in the directory.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

/// Domain use-case port for registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Store `details` under a freshly generated identifier.
    ///
    /// Fails with `duplicate_user` when the email is already registered.
    async fn register(&self, details: NewUser) -> Result<User, Error>;
}

/// Fixture registration that assigns an id without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRegistration;

#[async_trait]
impl UserRegistration for FixtureUserRegistration {
    async fn register(&self, details: NewUser) -> Result<User, Error> {
        Ok(User::new(UserId::random(), details))
    }
}
