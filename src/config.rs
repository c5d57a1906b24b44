//! Server configuration loaded from environment variables.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::store::IdStrategy;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind (from LAUNCHPAD_HOST).
    pub host: String,
    /// Port to bind (from LAUNCHPAD_PORT, falling back to PORT).
    pub port: u16,
    /// Allowed CORS origins (from LAUNCHPAD_CORS_ORIGINS, comma-separated).
    /// Any origin is allowed when unset or when the list contains `*`.
    pub cors_origins: Option<Vec<String>>,
    /// How record ids are generated (from LAUNCHPAD_ID_STRATEGY).
    pub id_strategy: IdStrategy,
    /// Whether info-level logs are emitted (from LOG_VERBOSE).
    pub log_verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: None,
            id_strategy: IdStrategy::default(),
            log_verbose: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = lookup("LAUNCHPAD_HOST").unwrap_or(defaults.host);

        let port = match lookup("LAUNCHPAD_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid port: {}", raw))?,
            None => defaults.port,
        };

        let cors_origins = lookup("LAUNCHPAD_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let id_strategy = match lookup("LAUNCHPAD_ID_STRATEGY") {
            Some(raw) => raw.parse::<IdStrategy>().map_err(anyhow::Error::msg)?,
            None => defaults.id_strategy,
        };

        let log_verbose = lookup("LOG_VERBOSE")
            .map(|v| v.trim() != "false")
            .unwrap_or(defaults.log_verbose);

        Ok(Self {
            host,
            port,
            cors_origins,
            id_strategy,
            log_verbose,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default `tracing` filter when RUST_LOG is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.log_verbose {
            "launchpad=info,tower_http=debug"
        } else {
            "launchpad=warn,tower_http=warn"
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let origins = match &self.cors_origins {
            Some(origins) if !origins.iter().any(|o| o == "*") => origins,
            _ => return CorsLayer::permissive(),
        };

        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
