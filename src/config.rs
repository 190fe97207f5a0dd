//! Configuration for the relay middleware
//!
//! Loaded once, owned by the constructed [`Logger`](crate::middleware::Logger),
//! immutable afterwards. Environment loading is fail-soft: unparseable values
//! fall back to defaults rather than aborting the host application. The hard
//! decision, refusing to construct when disabled, happens in
//! `Logger::new`, not here.

use std::env;

/// Default collector address when the environment does not say otherwise.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 24224;
pub const DEFAULT_TAG: &str = "app";

/// Configuration for the relay middleware
///
/// Loaded from environment variables:
/// - `LOGRELAY_ENABLED`: "true"/"1"/"yes" to enable the middleware
/// - `LOGRELAY_HOST`: collector host (default `127.0.0.1`)
/// - `LOGRELAY_PORT`: collector TCP port (default `24224`)
/// - `LOGRELAY_TAG`: base tag for emitted records (default `app`)
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Whether the middleware may be constructed at all
    pub enabled: bool,

    /// Collector host name or address
    pub host: String,

    /// Collector TCP port
    pub port: u16,

    /// Base tag; failure records go out under `<tag>.panic`
    pub tag: String,
}

impl LoggerConfig {
    /// Create a configuration with explicit values, enabled.
    pub fn new(host: impl Into<String>, port: u16, tag: impl Into<String>) -> Self {
        Self {
            enabled: true,
            host: host.into(),
            port,
            tag: tag.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Missing or malformed variables fall back to defaults; a missing
    /// `LOGRELAY_ENABLED` leaves the middleware disabled so that an
    /// unconfigured deployment never attempts a collector connection.
    pub fn from_env() -> Self {
        let enabled = match env::var("LOGRELAY_ENABLED") {
            Ok(val) => matches!(val.to_lowercase().as_str(), "true" | "1" | "yes"),
            Err(_) => false,
        };

        let host = env::var("LOGRELAY_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = env::var("LOGRELAY_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let tag = env::var("LOGRELAY_TAG").unwrap_or_else(|_| DEFAULT_TAG.to_string());

        Self {
            enabled,
            host,
            port,
            tag,
        }
    }

    /// Collector address as a `host:port` string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_is_enabled() {
        let config = LoggerConfig::new("collector.internal", 24224, "web");

        assert!(config.enabled);
        assert_eq!(config.host, "collector.internal");
        assert_eq!(config.port, 24224);
        assert_eq!(config.tag, "web");
    }

    #[test]
    fn test_addr_formatting() {
        let config = LoggerConfig::new("10.0.0.9", 5170, "api");
        assert_eq!(config.addr(), "10.0.0.9:5170");
    }

    // Environment scenarios live in one test: cargo runs tests on parallel
    // threads and the process environment is shared.
    #[test]
    fn test_from_env_scenarios() {
        env::remove_var("LOGRELAY_ENABLED");
        env::remove_var("LOGRELAY_HOST");
        env::remove_var("LOGRELAY_PORT");
        env::remove_var("LOGRELAY_TAG");

        let config = LoggerConfig::from_env();
        assert!(!config.enabled);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.tag, DEFAULT_TAG);

        for val in ["true", "1", "yes", "TRUE"] {
            env::set_var("LOGRELAY_ENABLED", val);
            assert!(LoggerConfig::from_env().enabled, "expected enabled for {val:?}");
        }
        env::set_var("LOGRELAY_ENABLED", "no");
        assert!(!LoggerConfig::from_env().enabled);

        env::set_var("LOGRELAY_PORT", "not-a-port");
        assert_eq!(LoggerConfig::from_env().port, DEFAULT_PORT);
        env::set_var("LOGRELAY_PORT", "5170");
        env::set_var("LOGRELAY_HOST", "collector.internal");
        env::set_var("LOGRELAY_TAG", "web");
        let config = LoggerConfig::from_env();
        assert_eq!(config.port, 5170);
        assert_eq!(config.host, "collector.internal");
        assert_eq!(config.tag, "web");

        env::remove_var("LOGRELAY_ENABLED");
        env::remove_var("LOGRELAY_HOST");
        env::remove_var("LOGRELAY_PORT");
        env::remove_var("LOGRELAY_TAG");
    }
}
