//! Driving port for mutating the waiting line.

use async_trait::async_trait;

use crate::domain::{Error, Position, User, UserId};

/// Domain use-case port for admission and serving.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LineCommand: Send + Sync {
    /// Append the registered user `id` at the tail and return its position.
    ///
    /// Fails with `user_not_found` for an unregistered id and
    /// `duplicate_in_line` when the user is already waiting.
    async fn admit(&self, id: &UserId) -> Result<Position, Error>;

    /// Remove and return the head of the line.
    ///
    /// Fails with `empty_line` when nobody is waiting.
    async fn pop_front(&self) -> Result<User, Error>;
}

/// Fixture command for an always-empty line that admits everyone at the
/// head.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLineCommand;

#[async_trait]
impl LineCommand for FixtureLineCommand {
    async fn admit(&self, _id: &UserId) -> Result<Position, Error> {
        Ok(Position::from_index(0))
    }

    async fn pop_front(&self) -> Result<User, Error> {
        Err(Error::empty_line())
    }
}
