//! HTTP inbound adapter exposing the tracker's REST endpoints.
//!
//! ```text
//! GET  /api/users                      List registered users
//! POST /api/users                      Register a user
//! POST /api/users/{_id}/exercises     Append an exercise
//! GET  /api/users/{_id}/logs          Read an exercise log
//! ```
//!
//! Handlers depend only on the domain's driving ports through
//! [`state::HttpState`], so they are testable against in-memory stores.

pub mod error;
pub mod exercises;
pub mod health;
pub mod query;
pub mod state;
pub mod users;

pub use error::ApiResult;
