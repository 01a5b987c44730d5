//! Server configuration.
//!
//! Loaded once from the environment at startup and handed to the router as a
//! read-only value. Recognized variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HOST | 0.0.0.0 | Bind address |
//! | PORT | 3000 | Bind port |
//! | WEBHOOK_URL | (unset) | Forward accepted submissions here; unset or blank disables forwarding |
//! | WEBHOOK_TIMEOUT_SECS | 10 | Upper bound on one webhook delivery |
//! | ALLOWED_ORIGINS | http://localhost:3000 | Comma-separated CORS origin whitelist |
//! | REQUEST_BODY_LIMIT_BYTES | 16777216 | Transport ceiling on a request body |

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use survey_core::defaults;
use thiserror::Error;
use tracing::warn;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid bind address {0}: {1}")]
    BindAddress(String, std::net::AddrParseError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration for the survey server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Webhook target. `None` disables forwarding.
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
    pub allowed_origins: Vec<String>,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            webhook_url: None,
            webhook_timeout: Duration::from_secs(defaults::WEBHOOK_TIMEOUT_SECS),
            allowed_origins: split_origins(defaults::ALLOWED_ORIGINS),
            body_limit: defaults::REQUEST_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let webhook_url = lookup("WEBHOOK_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(v) if !v.trim().is_empty() => split_origins(&v),
            _ => base.allowed_origins,
        };

        Self {
            host: lookup("HOST").unwrap_or(base.host),
            port: parse_or(&lookup, "PORT", base.port),
            webhook_url,
            webhook_timeout: Duration::from_secs(parse_or(
                &lookup,
                "WEBHOOK_TIMEOUT_SECS",
                defaults::WEBHOOK_TIMEOUT_SECS,
            )),
            allowed_origins,
            body_limit: parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", base.body_limit),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(url) = &self.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "WEBHOOK_URL must start with http:// or https://, got: {}",
                    url
                )));
            }
        }

        if self.webhook_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "WEBHOOK_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        if self.body_limit == 0 {
            return Err(ConfigError::Validation(
                "REQUEST_BODY_LIMIT_BYTES must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address to bind the listener to.
    pub fn bind_addr(&self) -> ConfigResult<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| ConfigError::BindAddress(addr.clone(), e))
    }

    /// Parsed CORS origins. Unparseable entries are skipped with a warning.
    pub fn cors_origins(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", origin, e);
                    None
                }
            })
            .collect()
    }

    pub fn webhook_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }
}

fn split_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {key} value '{raw}', using default: {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
        assert!(!config.webhook_enabled());
        assert_eq!(config.webhook_timeout, Duration::from_secs(10));
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("WEBHOOK_URL", "https://hooks.example.com/survey"),
            ("WEBHOOK_TIMEOUT_SECS", "3"),
            ("ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com"),
            ("REQUEST_BODY_LIMIT_BYTES", "1024"),
        ]));

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://hooks.example.com/survey")
        );
        assert_eq!(config.webhook_timeout, Duration::from_secs(3));
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert_eq!(config.body_limit, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_webhook_url_disables_forwarding() {
        let config = ServerConfig::from_lookup(lookup_from(&[("WEBHOOK_URL", "   ")]));
        assert_eq!(config.webhook_url, None);
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("WEBHOOK_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.webhook_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_validate_rejects_non_http_webhook() {
        let config = ServerConfig {
            webhook_url: Some("ftp://hooks.example.com".to_string()),
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_URL"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ServerConfig {
            webhook_timeout: Duration::ZERO,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:4000");

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad.bind_addr().is_err());
    }

    #[test]
    fn test_cors_origins_skip_invalid_entries() {
        let config = ServerConfig {
            allowed_origins: vec![
                "https://valid.example.com".to_string(),
                "bad\norigin".to_string(),
            ],
            ..ServerConfig::default()
        };
        let origins = config.cors_origins();
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0], "https://valid.example.com");
    }
}
