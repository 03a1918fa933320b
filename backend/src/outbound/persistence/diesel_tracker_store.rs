//! PostgreSQL-backed `TrackerStore` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `TrackerStore` port over the two
//! tracker tables. All database operations are async via `diesel-async`.
//!
//! # Atomicity
//!
//! `append_exercise` wraps the exercise insert and the owner's
//! `exercise_count` increment in one transaction: either both rows change or
//! neither does. A failed increment (the user row vanished between lookup
//! and write) aborts the transaction and surfaces as `MissingUser`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{StoreError, TrackerStore};
use crate::domain::{
    Description, DurationMinutes, Exercise, ExerciseValidationError, LogWindow, User, UserId,
    Username,
};

use super::models::{ExerciseRow, NewExerciseRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{exercises, users};

/// Diesel-backed implementation of the `TrackerStore` port.
#[derive(Clone)]
pub struct DieselTrackerStore {
    pool: DbPool,
}

impl DieselTrackerStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to store errors.
fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

/// Map Diesel errors on read paths to store errors.
fn map_read_error(error: diesel::result::Error) -> StoreError {
    debug!(error = %error, "diesel read failed");
    StoreError::query(error.to_string())
}

/// Map Diesel errors on write paths to store errors.
///
/// Unique violations on `users_username_key` become `DuplicateUsername` so
/// the registry can answer with a conflict instead of a server error.
fn map_write_error(error: diesel::result::Error, username: &Username) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(message = info.message(), "unique violation on insert");
            StoreError::duplicate_username(username)
        }
        _ => {
            debug!(error = %error, "diesel write failed");
            StoreError::write(error.to_string())
        }
    }
}

/// Rehydrate a domain user from a row.
fn user_from_row(row: UserRow) -> Result<User, StoreError> {
    let username = Username::new(row.username)
        .map_err(|err| StoreError::query(format!("stored username invalid: {err}")))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        row.exercise_count,
    ))
}

/// Rehydrate a domain exercise from a row.
fn exercise_from_row(row: ExerciseRow) -> Result<Exercise, StoreError> {
    let invalid = |err: ExerciseValidationError| {
        StoreError::query(format!("stored exercise invalid: {err}"))
    };
    Ok(Exercise::new(
        Description::new(row.description).map_err(invalid)?,
        DurationMinutes::new(row.duration_minutes).map_err(invalid)?,
        row.performed_on,
    ))
}

#[async_trait]
impl TrackerStore for DieselTrackerStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            exercise_count: user.exercise_count(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user.username()))?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = users::table
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(user_from_row).collect()
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(user_from_row).transpose()
    }

    async fn append_exercise(&self, user: &User, entry: &Exercise) -> Result<(), StoreError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let row = NewExerciseRow {
            id: Uuid::new_v4(),
            username: user.username().as_ref(),
            description: entry.description().as_ref(),
            duration_minutes: entry.duration().minutes(),
            performed_on: entry.performed_on(),
        };
        let owner_id = *user.id().as_uuid();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The entry insert and the count bump commit together or not at all.
        // An increment that matches zero rows means the owner vanished
        // between lookup and write; erroring here rolls the insert back too.
        let outcome = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(exercises::table)
                        .values(&row)
                        .execute(conn)
                        .await?;

                    let updated = diesel::update(users::table.find(owner_id))
                        .set(users::exercise_count.eq(users::exercise_count + 1))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Err(diesel::result::Error::NotFound);
                    }
                    Ok(())
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(()) => Ok(()),
            Err(diesel::result::Error::NotFound) => Err(StoreError::missing_user(user.id())),
            Err(err) => Err(map_write_error(err, user.username())),
        }
    }

    async fn load_log(&self, user: &User, window: &LogWindow) -> Result<Vec<Exercise>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = exercises::table
            .filter(exercises::username.eq(user.username().as_ref()))
            .order((exercises::performed_on.asc(), exercises::created_at.asc()))
            .select(ExerciseRow::as_select())
            .into_boxed();
        if let Some(after) = window.after() {
            query = query.filter(exercises::performed_on.gt(after));
        }
        if let Some(before) = window.before() {
            query = query.filter(exercises::performed_on.lt(before));
        }
        if let Some(limit) = window.limit() {
            query = query.limit(i64::from(limit));
        }

        let rows = query.load(&mut conn).await.map_err(map_read_error)?;

        rows.into_iter().map(exercise_from_row).collect()
    }
}
