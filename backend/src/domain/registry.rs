//! User registry domain service.
//!
//! Implements the [`UserRegistry`] driving port on top of any
//! [`TrackerStore`]. Uniqueness of usernames is delegated to the store's
//! unique constraint; there is no read-then-check step, so two concurrent
//! registrations of the same name cannot both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{StoreError, TrackerStore, UserRegistry};
use crate::domain::{Error, User, UserId, Username};

/// Response body sent when a username is already registered.
pub const USERNAME_TAKEN: &str = "Username taken.";

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

/// User registry service backed by a tracker store.
#[derive(Clone)]
pub struct RegistryService<S> {
    store: Arc<S>,
}

impl<S> RegistryService<S> {
    /// Create a new registry service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> UserRegistry for RegistryService<S>
where
    S: TrackerStore,
{
    async fn register(&self, username: Username) -> Result<User, Error> {
        let user = User::new(UserId::random(), username, 0);

        match self.store.insert_user(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "user registered");
                Ok(user)
            }
            Err(StoreError::DuplicateUsername { .. }) => Err(Error::conflict(USERNAME_TAKEN)),
            Err(other) => Err(map_store_error(other)),
        }
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.store.list_users().await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
