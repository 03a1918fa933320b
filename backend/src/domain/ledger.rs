//! Exercise ledger domain service.
//!
//! Implements the [`ExerciseLedger`] driving port on top of any
//! [`TrackerStore`]. Appends resolve the owning user first, default a
//! missing date to the current UTC calendar day, and rely on the store to
//! keep the exercise row and the user's count in step.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::domain::ports::{
    AppendedExercise, ExerciseLedger, StoreError, TrackerStore, UserLog,
};
use crate::domain::{Error, Exercise, ExerciseDraft, LogWindow, User, UserId};

/// Response body sent when the addressed user does not exist.
pub const USER_NOT_FOUND: &str = "User not found.";

fn map_store_error(error: StoreError) -> Error {
    match error {
        StoreError::Connection { message } => {
            Error::unavailable(format!("tracker store unavailable: {message}"))
        }
        StoreError::Write { message } => {
            Error::write_failure(format!("tracker store write failed: {message}"))
        }
        other => Error::internal(format!("tracker store error: {other}")),
    }
}

/// Exercise ledger service backed by a tracker store.
#[derive(Clone)]
pub struct LedgerService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> LedgerService<S> {
    /// Create a ledger service using the system clock.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(DefaultClock))
    }

    /// Create a ledger service with an injected clock.
    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl<S> LedgerService<S>
where
    S: TrackerStore,
{
    async fn resolve_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.store
            .find_user(user_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<S> ExerciseLedger for LedgerService<S>
where
    S: TrackerStore,
{
    async fn append(
        &self,
        user_id: &UserId,
        draft: ExerciseDraft,
    ) -> Result<AppendedExercise, Error> {
        let user = self.resolve_user(user_id).await?;

        let performed_on = draft
            .performed_on
            .unwrap_or_else(|| self.clock.utc().date_naive());
        let entry = Exercise::new(draft.description, draft.duration, performed_on);

        match self.store.append_exercise(&user, &entry).await {
            Ok(()) => {
                info!(user_id = %user.id(), performed_on = %performed_on, "exercise appended");
                Ok(AppendedExercise { user, entry })
            }
            // The user row can vanish between lookup and write.
            Err(StoreError::MissingUser { .. }) => Err(Error::not_found(USER_NOT_FOUND)),
            Err(other) => Err(map_store_error(other)),
        }
    }

    async fn read_log(&self, user_id: &UserId, window: &LogWindow) -> Result<UserLog, Error> {
        let user = self.resolve_user(user_id).await?;
        let entries = self
            .store
            .load_log(&user, window)
            .await
            .map_err(map_store_error)?;

        Ok(UserLog { user, entries })
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
