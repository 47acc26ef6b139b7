//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Which backing store the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// In-process keyspace, cleared on restart
    Memory,
    /// Networked Redis server at `Config::redis_url`
    Redis,
}

impl Backend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Backend::Memory),
            "redis" => Some(Backend::Redis),
            _ => None,
        }
    }

    /// Parses a `STORE_BACKEND` setting, warning and using `fallback`
    /// when the value names no known backend.
    fn resolve(value: &str, fallback: Self) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            warn!(
                "Unrecognised STORE_BACKEND '{}', falling back to {:?}",
                value, fallback
            );
            fallback
        })
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing store selection
    pub backend: Backend,
    /// Connection URL used when `backend` is `Redis`
    pub redis_url: String,
    /// Upper bound on every store call, in milliseconds
    pub store_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379/)
    /// - `STORE_TIMEOUT_MS` - Per-call store timeout (default: 2000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env::var("STORE_BACKEND")
                .ok()
                .map(|v| Backend::resolve(&v, defaults.backend))
                .unwrap_or(defaults.backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_timeout_ms),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Store call timeout as a `Duration`.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            store_timeout_ms: 2000,
            server_port: 3000,
        }
    }
}
