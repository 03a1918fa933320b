//! User data model.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(raw).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct a [`UserId`] from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique name a user registers under.
///
/// Only blank names are rejected; there is no other format rule. Surrounding
/// whitespace is preserved as supplied and uniqueness is byte-exact, so
/// `"bob"` and `" bob "` name two different users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = username.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Registered user together with its running exercise tally.
///
/// ## Invariants
/// - `username` is unique across all users (enforced by storage).
/// - `exercise_count` equals the number of exercises ever appended for this
///   user; the count is maintained transactionally alongside each append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    exercise_count: i32,
}

impl User {
    /// Build a [`User`] from validated components.
    #[must_use]
    pub fn new(id: UserId, username: Username, exercise_count: i32) -> Self {
        Self {
            id,
            username,
            exercise_count,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name the user registered under.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Number of exercises appended for this user so far.
    #[must_use]
    pub fn exercise_count(&self) -> i32 {
        self.exercise_count
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
