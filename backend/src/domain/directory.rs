//! Registered-user directory aggregate.
//!
//! The directory is the authority for identity: no two records share an id
//! or an email. It only grows; nothing removes a registration.

use super::{EmailAddress, NewUser, User, UserId};

/// Failures raised by [`Directory`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Another record already uses this email.
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
    /// Another record already uses this identifier.
    #[error("user id {id} is already registered")]
    DuplicateId { id: String },
}

/// In-memory view of every registered user, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    records: Vec<User>,
}

impl Directory {
    /// Rebuild the directory from a persisted snapshot.
    pub fn from_records(records: Vec<User>) -> Self {
        Self { records }
    }

    /// Registered users in registration order.
    pub fn records(&self) -> &[User] {
        &self.records
    }

    /// Consume the directory, yielding the snapshot to persist.
    pub fn into_records(self) -> Vec<User> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn exists(&self, id: &UserId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn find_by_id(&self, id: &UserId) -> Option<&User> {
        self.records.iter().find(|user| user.id() == id)
    }

    pub fn find_by_email(&self, email: &EmailAddress) -> Option<&User> {
        self.records.iter().find(|user| user.email() == email)
    }

    /// Store `details` under `id`, enforcing id and email uniqueness.
    ///
    /// # Examples
    /// ```
    /// use waitline::domain::{Directory, DirectoryError, NewUser, UserId};
    ///
    /// let details = NewUser::try_from_parts(
    ///     Some("Ana".into()),
    ///     Some("ana@x.com".into()),
    ///     Some("F".into()),
    /// )
    /// .expect("valid input");
    /// let mut directory = Directory::default();
    /// directory.register(UserId::random(), details.clone()).expect("first registration");
    /// let err = directory.register(UserId::random(), details).expect_err("duplicate");
    /// assert!(matches!(err, DirectoryError::DuplicateEmail { .. }));
    /// ```
    pub fn register(&mut self, id: UserId, details: NewUser) -> Result<User, DirectoryError> {
        if self.find_by_email(&details.email).is_some() {
            return Err(DirectoryError::DuplicateEmail {
                email: details.email.into(),
            });
        }
        if self.exists(&id) {
            return Err(DirectoryError::DuplicateId { id: id.into() });
        }

        let user = User::new(id, details);
        self.records.push(user.clone());
        Ok(user)
    }
}
