//! Construction of handler state from server configuration.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{LedgerService, RegistryService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::DieselTrackerStore;

use super::ServerConfig;

/// Build the HTTP handler state over database-backed services.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = Arc::new(DieselTrackerStore::new(config.pool.clone()));
    web::Data::new(HttpState::new(
        Arc::new(RegistryService::new(Arc::clone(&store))),
        Arc::new(LedgerService::new(store)),
        config.query_policy,
    ))
}
