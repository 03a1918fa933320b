//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! This module provides the concrete [`crate::domain::ports::TrackerStore`]
//! implementation backed by PostgreSQL via the Diesel ORM with async support
//! through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: the store only translates between Diesel models and
//!   domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Strongly typed errors**: all database errors are mapped to
//!   [`crate::domain::ports::StoreError`] variants.

mod diesel_tracker_store;
mod migrate;
mod models;
mod pool;
mod schema;

pub use diesel_tracker_store::DieselTrackerStore;
pub use migrate::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
