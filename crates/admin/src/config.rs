//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROSTER_HOST` - Bind address (default: 127.0.0.1)
//! - `ROSTER_PORT` - Listen port (default: 3001)
//! - `ROSTER_BASE_URL` - Public URL for the admin panel (default: `http://{host}:{port}`)
//! - `ROSTER_SEED_MOCK_DATA` - Start with the mock users and roles (default: true)
//! - `ROSTER_VALIDATION` - `permissive` or `strict` (default: permissive)
//! - `ROSTER_INTENT_QUEUE` - Console actor queue capacity (default: 64)
//! - `ROSTER_LOG_JSON` - Emit JSON log lines (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sample rates (default: 1.0)
//!
//! ## TLS
//! - `ROSTER_TLS_CERT` - PEM-encoded certificate chain
//! - `ROSTER_TLS_KEY` - PEM-encoded private key

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use roster_core::ValidationMode;
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_INTENT_QUEUE: usize = 64;
const DEFAULT_SAMPLE_RATE: f32 = 1.0;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Whether the console starts with the mock users and roles
    pub seed_mock_data: bool,
    /// Validation applied when drafts are saved
    pub validation: ValidationMode,
    /// Capacity of the console actor's command queue
    pub intent_queue: usize,
    /// Emit JSON log lines instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_source(env: &Source<'_>) -> Result<Option<Self>, ConfigError> {
        match (env.optional("ROSTER_TLS_CERT"), env.optional("ROSTER_TLS_KEY")) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ROSTER_TLS_*".to_string(),
                "Both ROSTER_TLS_CERT and ROSTER_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            base_url: default_base_url(DEFAULT_HOST, DEFAULT_PORT),
            seed_mock_data: true,
            validation: ValidationMode::default(),
            intent_queue: DEFAULT_INTENT_QUEUE,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: DEFAULT_SAMPLE_RATE,
            sentry_traces_sample_rate: DEFAULT_SAMPLE_RATE,
            tls: None,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Source(&lookup);

        let host = env.parsed("ROSTER_HOST", DEFAULT_HOST)?;
        let port = env.parsed("ROSTER_PORT", DEFAULT_PORT)?;
        let base_url = env
            .optional("ROSTER_BASE_URL")
            .unwrap_or_else(|| default_base_url(host, port));
        let seed_mock_data = env.flag("ROSTER_SEED_MOCK_DATA", true)?;
        let validation = env.parsed("ROSTER_VALIDATION", ValidationMode::default())?;
        let intent_queue = env.parsed("ROSTER_INTENT_QUEUE", DEFAULT_INTENT_QUEUE)?;
        if intent_queue == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ROSTER_INTENT_QUEUE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let log_json = env.flag("ROSTER_LOG_JSON", false)?;
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SAMPLE_RATE);
        let sentry_traces_sample_rate = env
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SAMPLE_RATE);
        let tls = TlsConfig::from_source(&env)?;

        Ok(Self {
            host,
            port,
            base_url,
            seed_mock_data,
            validation,
            intent_queue,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn default_base_url(host: IpAddr, port: u16) -> String {
    format!("http://{}", SocketAddr::new(host, port))
}

// =============================================================================
// Lookup helpers
// =============================================================================

struct Source<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Source<'_> {
    /// Get an optional variable, treating an empty value as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
    fn flag(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(value) = self.optional(key) else {
            return Ok(default);
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected true or false, got '{value}'"),
            )),
        }
    }
}
