//! Service configuration loaded via OrthoConfig, plus the runtime server
//! configuration object assembled from it.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::query::QueryPolicy;
use crate::outbound::persistence::{DbPool, PoolConfig};

/// Configuration values for the tracker service.
///
/// Layered CLI > environment > file, prefix `TRACKER_`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct TrackerSettings {
    /// PostgreSQL connection string. Required; startup fails without it.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = String::from("0.0.0.0:8080"))]
    pub bind_addr: String,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Connection checkout timeout in seconds.
    #[ortho_config(default = 30)]
    pub pool_connection_timeout_secs: u64,
    /// How malformed log-query parameters are treated.
    pub query_policy: Option<QueryPolicy>,
    /// Emit tracing output as JSON instead of human-readable lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl TrackerSettings {
    /// Return the database URL, erroring when it was not supplied.
    pub fn database_url(&self) -> Result<&str, std::io::Error> {
        self.database_url.as_deref().ok_or_else(|| {
            std::io::Error::other(
                "TRACKER_DATABASE_URL is required; set it to a PostgreSQL connection string",
            )
        })
    }

    /// Parse the configured bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.bind_addr
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid bind_addr: {err}")))
    }

    /// Build the pool configuration from the settings.
    pub fn pool_config(&self) -> Result<PoolConfig, std::io::Error> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size)
            .with_connection_timeout(Duration::from_secs(self.pool_connection_timeout_secs)))
    }

    /// Return the configured query policy, defaulting to lenient.
    #[must_use]
    pub fn query_policy(&self) -> QueryPolicy {
        self.query_policy.unwrap_or_default()
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pool: DbPool,
    pub(crate) query_policy: QueryPolicy,
}

impl ServerConfig {
    /// Construct a server configuration over an established pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, pool: DbPool) -> Self {
        Self {
            bind_addr,
            pool,
            query_policy: QueryPolicy::default(),
        }
    }

    /// Override the log-query parsing policy.
    #[must_use]
    pub fn with_query_policy(mut self, policy: QueryPolicy) -> Self {
        self.query_policy = policy;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> TrackerSettings {
        TrackerSettings::load_from_iter([OsString::from("tracker-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("TRACKER_DATABASE_URL", None::<String>),
            ("TRACKER_BIND_ADDR", None::<String>),
            ("TRACKER_POOL_MAX_SIZE", None::<String>),
            ("TRACKER_POOL_CONNECTION_TIMEOUT_SECS", None::<String>),
            ("TRACKER_QUERY_POLICY", None::<String>),
            ("TRACKER_LOG_JSON", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.database_url.is_none());
        assert!(settings.database_url().is_err());
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.pool_max_size, 10);
        assert_eq!(settings.pool_connection_timeout_secs, 30);
        assert_eq!(settings.query_policy(), QueryPolicy::Lenient);
        assert!(!settings.log_json);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "TRACKER_DATABASE_URL",
                Some("postgres://localhost/tracker".to_owned()),
            ),
            ("TRACKER_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("TRACKER_POOL_MAX_SIZE", Some("4".to_owned())),
            ("TRACKER_POOL_CONNECTION_TIMEOUT_SECS", Some("5".to_owned())),
            ("TRACKER_QUERY_POLICY", Some("strict".to_owned())),
            ("TRACKER_LOG_JSON", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url().expect("url set"),
            "postgres://localhost/tracker"
        );
        assert_eq!(
            settings.socket_addr().expect("valid addr"),
            "127.0.0.1:9090".parse().expect("valid addr")
        );
        assert_eq!(settings.pool_max_size, 4);
        assert_eq!(settings.query_policy(), QueryPolicy::Strict);
        assert!(settings.log_json);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([
            (
                "TRACKER_DATABASE_URL",
                Some("postgres://localhost/tracker".to_owned()),
            ),
            ("TRACKER_BIND_ADDR", Some("not-an-addr".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.socket_addr().is_err());
    }
}
