//! Test utilities for the tracker backend crate.
//!
//! This module provides shared doubles for both unit tests (in `src/`) and
//! integration tests (in `tests/`): an in-memory [`TrackerStore`], a store
//! that fails every call with a chosen error, and a clock pinned to a fixed
//! instant. It is compiled only for tests or when the `test-support` feature
//! is enabled.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;

use std::sync::Arc;

use crate::domain::ports::{StoreError, TrackerStore};
use crate::domain::{Exercise, LedgerService, LogWindow, RegistryService, User, UserId};
use crate::inbound::http::query::QueryPolicy;
use crate::inbound::http::state::HttpState;

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    // Username paired with the entry; insertion order stands in for the
    // created-at tiebreak used by the real store.
    entries: Vec<(String, Exercise)>,
}

/// In-memory [`TrackerStore`] with the same observable behaviour as the
/// database adapter: byte-exact duplicate-username detection, atomic count
/// bumps, and chronologically ordered log reads.
#[derive(Default)]
pub struct InMemoryTrackerStore {
    state: Mutex<StoreState>,
}

impl InMemoryTrackerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        store.lock_state().users.extend(users);
        store
    }

    /// Look up a stored user by id, for assertions.
    pub fn stored_user(&self, id: &UserId) -> Option<User> {
        self.lock_state()
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
    }

    /// Total number of stored exercise entries, for assertions.
    pub fn entry_count(&self) -> usize {
        self.lock_state().entries.len()
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("store mutex poisoned"),
        }
    }
}

#[async_trait]
impl TrackerStore for InMemoryTrackerStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut state = self.lock_state();
        if state
            .users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(StoreError::duplicate_username(user.username()));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock_state().users.clone())
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock_state()
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn append_exercise(&self, user: &User, entry: &Exercise) -> Result<(), StoreError> {
        let mut state = self.lock_state();
        let Some(stored) = state
            .users
            .iter_mut()
            .find(|existing| existing.id() == user.id())
        else {
            return Err(StoreError::missing_user(user.id()));
        };

        *stored = User::new(
            *stored.id(),
            stored.username().clone(),
            stored.exercise_count() + 1,
        );
        state
            .entries
            .push((user.username().as_ref().to_owned(), entry.clone()));
        Ok(())
    }

    async fn load_log(&self, user: &User, window: &LogWindow) -> Result<Vec<Exercise>, StoreError> {
        let state = self.lock_state();
        let mut matching: Vec<Exercise> = state
            .entries
            .iter()
            .filter(|(username, entry)| {
                username == user.username().as_ref() && window.contains(entry.performed_on())
            })
            .map(|(_, entry)| entry.clone())
            .collect();

        // Stable sort keeps same-day entries in insertion order.
        matching.sort_by_key(Exercise::performed_on);
        if let Some(limit) = window.limit() {
            matching.truncate(limit as usize);
        }
        Ok(matching)
    }
}

/// Build an [`HttpState`] over real services backed by `store`, using the
/// system clock.
pub fn http_state(store: Arc<InMemoryTrackerStore>, policy: QueryPolicy) -> HttpState {
    HttpState::new(
        Arc::new(RegistryService::new(Arc::clone(&store))),
        Arc::new(LedgerService::new(store)),
        policy,
    )
}

/// Build an [`HttpState`] with an injected clock for date-default tests.
pub fn http_state_with_clock(
    store: Arc<InMemoryTrackerStore>,
    clock: Arc<dyn Clock>,
    policy: QueryPolicy,
) -> HttpState {
    HttpState::new(
        Arc::new(RegistryService::new(Arc::clone(&store))),
        Arc::new(LedgerService::with_clock(store, clock)),
        policy,
    )
}

/// [`TrackerStore`] double that fails every call with a fixed error.
pub struct FailingTrackerStore {
    error: StoreError,
}

impl FailingTrackerStore {
    /// Create a store that always returns a clone of `error`.
    pub fn new(error: StoreError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TrackerStore for FailingTrackerStore {
    async fn insert_user(&self, _user: &User) -> Result<(), StoreError> {
        Err(self.error.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Err(self.error.clone())
    }

    async fn find_user(&self, _id: &UserId) -> Result<Option<User>, StoreError> {
        Err(self.error.clone())
    }

    async fn append_exercise(&self, _user: &User, _entry: &Exercise) -> Result<(), StoreError> {
        Err(self.error.clone())
    }

    async fn load_log(
        &self,
        _user: &User,
        _window: &LogWindow,
    ) -> Result<Vec<Exercise>, StoreError> {
        Err(self.error.clone())
    }
}

/// Clock pinned to a fixed instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Create a clock that always reports `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Create a clock pinned to midday UTC on the given calendar date.
    pub fn on_date(date: NaiveDate) -> Self {
        let noon = match date.and_hms_opt(12, 0, 0) {
            Some(instant) => instant,
            None => panic!("midday must exist on {date}"),
        };
        Self(noon.and_utc())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
