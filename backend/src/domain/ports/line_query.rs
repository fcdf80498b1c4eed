//! Driving port for reading the waiting line.
//!
//! Every listing is computed from the current order, so positions always
//! reflect the latest admission or pop.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Gender, LineEntry, Position};

/// Domain use-case port for line reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LineQuery: Send + Sync {
    /// Position of the waiting user with `email`.
    async fn position_of(&self, email: &EmailAddress) -> Result<Position, Error>;

    /// Every waiting user with their position, head first.
    async fn list(&self) -> Result<Vec<LineEntry>, Error>;

    /// The listing restricted to `gender`, keeping unfiltered positions.
    async fn filter_by_gender(&self, gender: &Gender) -> Result<Vec<LineEntry>, Error>;
}

/// Fixture query over an empty line.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLineQuery;

#[async_trait]
impl LineQuery for FixtureLineQuery {
    async fn position_of(&self, _email: &EmailAddress) -> Result<Position, Error> {
        Err(Error::email_not_found())
    }

    async fn list(&self) -> Result<Vec<LineEntry>, Error> {
        Err(Error::empty_line())
    }

    async fn filter_by_gender(&self, _gender: &Gender) -> Result<Vec<LineEntry>, Error> {
        Err(Error::empty_line())
    }
}
