//! Waiting-line aggregate.
//!
//! The line is an ordered FIFO of user snapshots copied from the directory
//! at admission time. Entries join at the tail and leave from the head.
//! A user's position is never stored: it is the entry's 1-based index,
//! recomputed on every read, so serving the head renumbers everyone behind
//! it without any bookkeeping.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EmailAddress, Gender, User, UserId};

/// 1-based place in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Position(usize);

impl Position {
    /// Position of the entry stored at zero-based `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public projection of a waiting user: identifiers are internal, so the
/// `id` is stripped and the derived position attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineEntry {
    #[schema(example = "Bo")]
    pub name: String,
    #[schema(example = "bo@x.com")]
    pub email: String,
    #[schema(example = "M")]
    pub gender: String,
    #[schema(value_type = usize, example = 2)]
    pub position: Position,
}

impl LineEntry {
    fn project(user: &User, position: Position) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
            gender: user.gender().to_string(),
            position,
        }
    }
}

/// Failures raised by [`Line`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("user {id} is already in line")]
    DuplicateInLine { id: String },
    #[error("no entry in line has email {email}")]
    EmailNotFound { email: String },
    #[error("no entry in line has gender {gender}")]
    GenderNotFound { gender: String },
    #[error("line is empty")]
    EmptyLine,
}

/// Ordered sequence of waiting users.
///
/// ## Invariants
/// - A user id appears at most once (enforced by [`Line::admit`]).
/// - Order is strictly FIFO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    entries: VecDeque<User>,
}

impl Line {
    /// Rebuild the line from a persisted snapshot, head first.
    pub fn from_entries(entries: Vec<User>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Consume the line, yielding the snapshot to persist, head first.
    pub fn into_entries(self) -> Vec<User> {
        self.entries.into()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.entries.iter().any(|user| user.id() == id)
    }

    /// Append `user` at the tail and return its position.
    ///
    /// # Examples
    /// ```
    /// use waitline::domain::{Line, User};
    ///
    /// let ana = User::try_from_strings("a", "Ana", "ana@x.com", "F").expect("valid");
    /// let mut line = Line::default();
    /// assert_eq!(line.admit(ana.clone()).map(|p| p.get()), Ok(1));
    /// assert!(line.admit(ana).is_err());
    /// ```
    pub fn admit(&mut self, user: User) -> Result<Position, LineError> {
        if self.contains(user.id()) {
            return Err(LineError::DuplicateInLine {
                id: user.id().to_string(),
            });
        }
        self.entries.push_back(user);
        Ok(Position::from_index(self.entries.len() - 1))
    }

    /// Position of the first entry with `email`.
    pub fn position_of(&self, email: &EmailAddress) -> Result<Position, LineError> {
        self.entries
            .iter()
            .position(|user| user.email() == email)
            .map(Position::from_index)
            .ok_or_else(|| LineError::EmailNotFound {
                email: email.to_string(),
            })
    }

    /// Every entry paired with its position, head first.
    ///
    /// An empty line is an error rather than an empty listing so callers can
    /// tell "nothing waiting" apart from "filter matched nothing".
    pub fn listing(&self) -> Result<Vec<LineEntry>, LineError> {
        if self.entries.is_empty() {
            return Err(LineError::EmptyLine);
        }
        Ok(self
            .entries
            .iter()
            .enumerate()
            .map(|(index, user)| LineEntry::project(user, Position::from_index(index)))
            .collect())
    }

    /// The subsequence of [`Line::listing`] whose gender equals `gender`,
    /// keeping positions from the unfiltered listing.
    ///
    /// [`LineError::EmptyLine`] takes precedence over
    /// [`LineError::GenderNotFound`].
    pub fn filter_by_gender(&self, gender: &Gender) -> Result<Vec<LineEntry>, LineError> {
        let matches: Vec<LineEntry> = self
            .listing()?
            .into_iter()
            .filter(|entry| entry.gender == gender.as_ref())
            .collect();
        if matches.is_empty() {
            return Err(LineError::GenderNotFound {
                gender: gender.to_string(),
            });
        }
        Ok(matches)
    }

    /// Remove and return the head, whoever it is.
    pub fn pop_front(&mut self) -> Result<User, LineError> {
        self.entries.pop_front().ok_or(LineError::EmptyLine)
    }
}

#[cfg(test)]
mod tests;
