//! User data model.
//!
//! A [`User`] is created once by registration and never mutated. The line
//! stores copies taken at admission time, so every field type here is a
//! cheap, validated value object.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned while building user values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    MissingId,
    MissingName,
    MissingEmail,
    MissingGender,
    InvalidEmail,
}

impl UserValidationError {
    /// Request field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingId => "id",
            Self::MissingName => "name",
            Self::MissingEmail | Self::InvalidEmail => "email",
            Self::MissingGender => "gender",
        }
    }

    /// Whether the error reports an absent or blank field.
    pub fn is_missing_field(self) -> bool {
        !matches!(self, Self::InvalidEmail)
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "Invalid Email"),
            missing => write!(f, "{} is required", missing.field()),
        }
    }
}

impl std::error::Error for UserValidationError {}

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(EMAIL_PATTERN).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
});

/// Syntactic email check: `local@label(.label)+`.
///
/// # Examples
/// ```
/// use waitline::domain::is_valid_email_syntax;
///
/// assert!(is_valid_email_syntax("ana@x.com"));
/// assert!(!is_valid_email_syntax("ana@d&d"));
/// ```
///
/// # Panics
/// Only if the built-in email pattern fails to compile, which the unit tests
/// rule out.
pub fn is_valid_email_syntax(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

fn non_blank(value: String, error: UserValidationError) -> Result<String, UserValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(value)
    }
}

macro_rules! string_value {
    ($(#[$meta:meta])* $name:ident, $missing:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap the provided value.
            pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
                Self::validate(value.into()).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = UserValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl $name {
            fn missing() -> UserValidationError {
                $missing
            }
        }
    };
}

string_value!(
    /// Opaque user identifier. Generated identifiers are UUID v4 strings, but
    /// any non-empty value without surrounding whitespace is accepted for
    /// lookups.
    UserId,
    UserValidationError::MissingId
);

impl UserId {
    /// Generate a fresh unique identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn validate(value: String) -> Result<String, UserValidationError> {
        let value = non_blank(value, Self::missing())?;
        Ok(value.trim().to_owned())
    }
}

string_value!(
    /// Name supplied at registration.
    UserName,
    UserValidationError::MissingName
);

impl UserName {
    fn validate(value: String) -> Result<String, UserValidationError> {
        non_blank(value, Self::missing())
    }
}

string_value!(
    /// Syntactically valid email address, compared exactly as submitted.
    EmailAddress,
    UserValidationError::MissingEmail
);

impl EmailAddress {
    fn validate(value: String) -> Result<String, UserValidationError> {
        let value = non_blank(value, Self::missing())?;
        if is_valid_email_syntax(&value) {
            Ok(value)
        } else {
            Err(UserValidationError::InvalidEmail)
        }
    }
}

string_value!(
    /// Free-form gender tag used for filtering; compared by exact equality.
    Gender,
    UserValidationError::MissingGender
);

impl Gender {
    fn validate(value: String) -> Result<String, UserValidationError> {
        non_blank(value, Self::missing())
    }
}

/// Registration input: every field a [`User`] has except the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub gender: Gender,
}

impl NewUser {
    /// Build registration input from optional raw fields.
    ///
    /// Presence of all three fields is checked before email syntax, so a
    /// request missing `gender` reports [`UserValidationError::MissingGender`]
    /// even when its email is also malformed.
    ///
    /// # Examples
    /// ```
    /// use waitline::domain::{NewUser, UserValidationError};
    ///
    /// let err = NewUser::try_from_parts(Some("Ana".into()), Some("bad".into()), None)
    ///     .expect_err("gender missing");
    /// assert_eq!(err, UserValidationError::MissingGender);
    /// ```
    pub fn try_from_parts(
        name: Option<String>,
        email: Option<String>,
        gender: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = present(name, UserValidationError::MissingName)?;
        let email = present(email, UserValidationError::MissingEmail)?;
        let gender = present(gender, UserValidationError::MissingGender)?;

        Ok(Self {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
            gender: Gender::new(gender)?,
        })
    }
}

fn present(value: Option<String>, error: UserValidationError) -> Result<String, UserValidationError> {
    value.ok_or(error).and_then(|value| non_blank(value, error))
}

/// Registered user.
///
/// ## Invariants
/// - Every field is validated; `email` is syntactically valid.
/// - Records are immutable after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "Ana")]
    name: UserName,
    #[schema(value_type = String, example = "ana@x.com")]
    email: EmailAddress,
    #[schema(value_type = String, example = "F")]
    gender: Gender,
}

impl User {
    /// Assign an identifier to registration input.
    pub fn new(id: UserId, details: NewUser) -> Self {
        let NewUser {
            name,
            email,
            gender,
        } = details;
        Self {
            id,
            name,
            email,
            gender,
        }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        gender: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let details = NewUser {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
            gender: Gender::new(gender)?,
        };
        Ok(Self::new(UserId::new(id)?, details))
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn gender(&self) -> &Gender {
        &self.gender
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: String,
    name: String,
    email: String,
    gender: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            gender,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            gender: gender.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.name, value.email, value.gender)
    }
}
