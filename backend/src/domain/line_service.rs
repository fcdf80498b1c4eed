//! Queue domain service.
//!
//! `LineService` implements every driving port over the two driven
//! repositories. Each collection is read, mutated in memory through the
//! [`Directory`] or [`Line`] aggregate, then written back as a whole
//! snapshot. Mutations of one collection are serialised by a per-collection
//! writer lock so concurrent requests cannot both act on the same stale
//! snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    DirectoryQuery, DirectoryRepository, DirectoryRepositoryError, LineCommand, LineQuery,
    LineRepository, LineRepositoryError, UserRegistration,
};
use crate::domain::{
    Directory, DirectoryError, EmailAddress, Error, Gender, Line, LineEntry, LineError, NewUser,
    Position, User, UserId,
};

/// Queue service implementing the registration, directory and line ports.
pub struct LineService<D, L> {
    directory_repo: Arc<D>,
    line_repo: Arc<L>,
    directory_writer: Mutex<()>,
    line_writer: Mutex<()>,
}

impl<D, L> LineService<D, L> {
    /// Create a new service over the given repositories.
    pub fn new(directory_repo: Arc<D>, line_repo: Arc<L>) -> Self {
        Self {
            directory_repo,
            line_repo,
            directory_writer: Mutex::new(()),
            line_writer: Mutex::new(()),
        }
    }
}

impl<D, L> LineService<D, L>
where
    D: DirectoryRepository,
    L: LineRepository,
{
    fn map_directory_repository_error(err: DirectoryRepositoryError) -> Error {
        error!(error = %err, "directory repository failed");
        match err {
            DirectoryRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("directory store unavailable: {message}"))
            }
            DirectoryRepositoryError::Query { message } => {
                Error::internal(format!("directory store error: {message}"))
            }
            DirectoryRepositoryError::Serialization { message } => {
                Error::internal(format!("directory store content invalid: {message}"))
            }
        }
    }

    fn map_line_repository_error(err: LineRepositoryError) -> Error {
        error!(error = %err, "line repository failed");
        match err {
            LineRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("line store unavailable: {message}"))
            }
            LineRepositoryError::Query { message } => {
                Error::internal(format!("line store error: {message}"))
            }
            LineRepositoryError::Serialization { message } => {
                Error::internal(format!("line store content invalid: {message}"))
            }
        }
    }

    fn map_directory_error(err: DirectoryError) -> Error {
        warn!(error = %err, "registration rejected");
        match err {
            DirectoryError::DuplicateEmail { .. } => Error::duplicate_user(),
            DirectoryError::DuplicateId { id } => {
                Error::internal(format!("generated user id {id} collided"))
            }
        }
    }

    fn map_line_error(err: LineError) -> Error {
        match &err {
            LineError::EmptyLine => debug!("line is empty"),
            other => warn!(error = %other, "line operation rejected"),
        }
        match err {
            LineError::DuplicateInLine { .. } => Error::duplicate_in_line(),
            LineError::EmailNotFound { .. } => Error::email_not_found(),
            LineError::GenderNotFound { .. } => Error::gender_not_found(),
            LineError::EmptyLine => Error::empty_line(),
        }
    }

    async fn load_directory(&self) -> Result<Directory, Error> {
        self.directory_repo
            .load()
            .await
            .map(Directory::from_records)
            .map_err(Self::map_directory_repository_error)
    }

    async fn load_line(&self) -> Result<Line, Error> {
        self.line_repo
            .load()
            .await
            .map(Line::from_entries)
            .map_err(Self::map_line_repository_error)
    }

    async fn store_line(&self, line: Line) -> Result<(), Error> {
        let entries = line.into_entries();
        self.line_repo
            .replace(&entries)
            .await
            .map_err(Self::map_line_repository_error)
    }
}

#[async_trait]
impl<D, L> UserRegistration for LineService<D, L>
where
    D: DirectoryRepository,
    L: LineRepository,
{
    async fn register(&self, details: NewUser) -> Result<User, Error> {
        let _writer = self.directory_writer.lock().await;
        let mut directory = self.load_directory().await?;

        let user = directory
            .register(UserId::random(), details)
            .map_err(Self::map_directory_error)?;

        let records = directory.into_records();
        self.directory_repo
            .replace(&records)
            .await
            .map_err(Self::map_directory_repository_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<D, L> DirectoryQuery for LineService<D, L>
where
    D: DirectoryRepository,
    L: LineRepository,
{
    async fn exists(&self, id: &UserId) -> Result<bool, Error> {
        Ok(self.load_directory().await?.exists(id))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, Error> {
        Ok(self.load_directory().await?.find_by_email(email).cloned())
    }
}

#[async_trait]
impl<D, L> LineCommand for LineService<D, L>
where
    D: DirectoryRepository,
    L: LineRepository,
{
    async fn admit(&self, id: &UserId) -> Result<Position, Error> {
        let user = match self.load_directory().await?.find_by_id(id) {
            Some(user) => user.clone(),
            None => {
                warn!(user_id = %id, "admission of unknown user rejected");
                return Err(Error::user_not_found());
            }
        };

        let _writer = self.line_writer.lock().await;
        let mut line = self.load_line().await?;
        let position = line.admit(user).map_err(Self::map_line_error)?;
        self.store_line(line).await?;

        info!(user_id = %id, %position, "user admitted");
        Ok(position)
    }

    async fn pop_front(&self) -> Result<User, Error> {
        let _writer = self.line_writer.lock().await;
        let mut line = self.load_line().await?;
        let served = line.pop_front().map_err(Self::map_line_error)?;
        let remaining = line.len();
        self.store_line(line).await?;

        info!(user_id = %served.id(), remaining, "head of line served");
        Ok(served)
    }
}

#[async_trait]
impl<D, L> LineQuery for LineService<D, L>
where
    D: DirectoryRepository,
    L: LineRepository,
{
    async fn position_of(&self, email: &EmailAddress) -> Result<Position, Error> {
        let position = self
            .load_line()
            .await?
            .position_of(email)
            .map_err(Self::map_line_error)?;
        debug!(%position, "position looked up");
        Ok(position)
    }

    async fn list(&self) -> Result<Vec<LineEntry>, Error> {
        let entries = self.load_line().await?.listing().map_err(Self::map_line_error)?;
        debug!(count = entries.len(), "line listed");
        Ok(entries)
    }

    async fn filter_by_gender(&self, gender: &Gender) -> Result<Vec<LineEntry>, Error> {
        let entries = self
            .load_line()
            .await?
            .filter_by_gender(gender)
            .map_err(Self::map_line_error)?;
        debug!(%gender, count = entries.len(), "line filtered");
        Ok(entries)
    }
}

#[cfg(test)]
#[path = "line_service_tests.rs"]
mod tests;
