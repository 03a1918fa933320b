//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseLedger, UserRegistry};
use crate::inbound::http::query::QueryPolicy;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User registration and listing use-cases.
    pub registry: Arc<dyn UserRegistry>,
    /// Exercise append and log-read use-cases.
    pub ledger: Arc<dyn ExerciseLedger>,
    /// How malformed log-query parameters are treated.
    pub query_policy: QueryPolicy,
}

impl HttpState {
    /// Construct state over the given port implementations.
    pub fn new(
        registry: Arc<dyn UserRegistry>,
        ledger: Arc<dyn ExerciseLedger>,
        query_policy: QueryPolicy,
    ) -> Self {
        Self {
            registry,
            ledger,
            query_policy,
        }
    }
}
