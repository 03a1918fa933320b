//! Domain ports defining the edges of the hexagon.
//!
//! The driving ports ([`UserRegistry`], [`ExerciseLedger`]) describe the
//! use-cases inbound adapters call into. The driven port ([`TrackerStore`])
//! describes what the domain expects from persistence. Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::{Error, Exercise, ExerciseDraft, LogWindow, User, UserId, Username};

/// Persistence errors raised by [`TrackerStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store connection could not be established or was lost.
    #[error("tracker store connection failed: {message}")]
    Connection { message: String },
    /// Read query failed during execution.
    #[error("tracker store query failed: {message}")]
    Query { message: String },
    /// Write or transaction failed to commit.
    #[error("tracker store write failed: {message}")]
    Write { message: String },
    /// Another user already registered this username.
    #[error("username already registered: {username}")]
    DuplicateUsername { username: String },
    /// The owning user row vanished between lookup and write.
    #[error("user {id} missing during write")]
    MissingUser { id: String },
}

impl StoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for read query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint violations on the username.
    pub fn duplicate_username(username: &Username) -> Self {
        Self::DuplicateUsername {
            username: username.as_ref().to_owned(),
        }
    }

    /// Helper for a user row that disappeared mid-operation.
    pub fn missing_user(id: &UserId) -> Self {
        Self::MissingUser { id: id.to_string() }
    }
}

/// Persistence port for users and their exercise logs.
///
/// `append_exercise` must be atomic: the exercise row and the owner's
/// `exercise_count` increment commit together or not at all.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    /// Insert a freshly registered user.
    ///
    /// Returns [`StoreError::DuplicateUsername`] when the username is
    /// already registered.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// List every registered user in registration order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Fetch a user by identifier.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Append an exercise for `user` and bump its exercise count atomically.
    async fn append_exercise(&self, user: &User, entry: &Exercise) -> Result<(), StoreError>;

    /// Load the exercises owned by `user` that fall inside `window`,
    /// ordered chronologically.
    async fn load_log(&self, user: &User, window: &LogWindow) -> Result<Vec<Exercise>, StoreError>;
}

/// Result of appending an exercise: the owning user plus the stored entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendedExercise {
    pub user: User,
    pub entry: Exercise,
}

/// Result of reading a log: the owning user plus the matching entries.
///
/// `user.exercise_count()` is the lifetime total for the user, not the
/// number of entries that matched the window.
#[derive(Debug, Clone, PartialEq)]
pub struct UserLog {
    pub user: User,
    pub entries: Vec<Exercise>,
}

/// Driving port for registering and listing users.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Register a new user under `username`.
    async fn register(&self, username: Username) -> Result<User, Error>;

    /// List all registered users.
    async fn list(&self) -> Result<Vec<User>, Error>;
}

/// Driving port for appending to and reading a user's exercise log.
#[async_trait]
pub trait ExerciseLedger: Send + Sync {
    /// Append an exercise to the log of the user identified by `user_id`.
    async fn append(
        &self,
        user_id: &UserId,
        draft: ExerciseDraft,
    ) -> Result<AppendedExercise, Error>;

    /// Read the log of the user identified by `user_id`, filtered by
    /// `window`.
    async fn read_log(&self, user_id: &UserId, window: &LogWindow) -> Result<UserLog, Error>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        StoreError::connection("refused"),
        "tracker store connection failed: refused"
    )]
    #[case(StoreError::query("timeout"), "tracker store query failed: timeout")]
    #[case(StoreError::write("rollback"), "tracker store write failed: rollback")]
    fn store_error_display_includes_context(#[case] error: StoreError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn duplicate_username_helper_copies_the_name() {
        let username = Username::new("ada").expect("valid username");
        let error = StoreError::duplicate_username(&username);
        assert_eq!(
            error,
            StoreError::DuplicateUsername {
                username: "ada".to_owned()
            }
        );
    }

    #[rstest]
    fn missing_user_helper_records_the_id() {
        let id = UserId::random();
        let error = StoreError::missing_user(&id);
        assert_eq!(
            error,
            StoreError::MissingUser {
                id: id.to_string()
            }
        );
    }
}
