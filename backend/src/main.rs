//! Backend entry-point: configuration, migrations, pool, and HTTP server.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tracker_backend::inbound::http::health::HealthState;
use tracker_backend::outbound::persistence::{DbPool, run_migrations};
use tracker_backend::server::{ServerConfig, TrackerSettings, create_server};

fn init_tracing(json: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        warn!(error = %err, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = TrackerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load configuration: {err}")))?;
    init_tracing(settings.log_json);

    let database_url = settings.database_url()?.to_owned();
    let bind_addr = settings.socket_addr()?;

    // Apply schema changes before the pool exists; an unreachable database
    // aborts startup instead of being retried.
    let migration_url = database_url.clone();
    web::block(move || run_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(settings.pool_config()?)
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let config =
        ServerConfig::new(bind_addr, pool).with_query_policy(settings.query_policy());

    info!(%bind_addr, policy = ?settings.query_policy(), "starting exercise tracker");
    let server = create_server(health_state, config)?;
    server.await
}
