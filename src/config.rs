//! HTTP service configuration.
//!
//! Defaults match the browser front-end the service was built for: bind
//! `127.0.0.1:8000`, allow `http://localhost:3000`.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid allowed origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("Invalid listen address {0:?}")]
    InvalidListenAddr(String),
}

/// Configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Browser origins allowed to call the API (CORS, with credentials).
    pub allowed_origins: Vec<String>,
    /// Upper bound for `num_processes` on the test-data endpoint.
    pub max_generated_processes: usize,
    /// Upper bound for `num_processors` on every endpoint.
    pub max_processors: usize,
    pub default_num_processes: usize,
    pub default_num_processors: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_generated_processes: 10_000,
            max_processors: 1024,
            default_num_processes: 10,
            default_num_processors: 4,
        }
    }
}

impl ServerConfig {
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            ..Default::default()
        }
    }

    /// Parses `host:port` into a config with default settings.
    ///
    /// `host` must be an IP literal.
    pub fn from_host_port(host: &str, port: u16) -> Result<Self, ConfigError> {
        let raw = format!("{host}:{port}");
        let listen_addr = raw
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(raw))?;
        Ok(Self::new(listen_addr))
    }

    /// Replaces the allowed origin list.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    pub fn with_max_generated_processes(mut self, max: usize) -> Self {
        self.max_generated_processes = max;
        self
    }

    pub fn with_max_processors(mut self, max: usize) -> Self {
        self.max_processors = max;
        self
    }

    /// Builds the CORS layer for the configured origins.
    ///
    /// Credentials are allowed, so methods and headers mirror the request
    /// instead of using a wildcard.
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidOrigin {
                    origin: origin.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()))
    }
}
