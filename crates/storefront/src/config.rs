//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `COSMIC_BUCKET_SLUG` - Cosmic bucket holding the catalog
//! - `COSMIC_READ_KEY` - Bucket read key
//!
//! ## Optional
//! - `COSMIC_WRITE_KEY` - Bucket write key (accepted, never used by the storefront)
//! - `COSMIC_API_ENVIRONMENT` - `production` or `staging` (default: staging)
//! - `COSMIC_API_URL` - Override the API base URL (e.g., for a local mock)
//! - `COSMIC_TIMEOUT_SECS` - Per-request timeout for the content store (default: 10)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `PAGE_REVALIDATE_SECS` - Page revalidation window (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// How long a rendered page is served before it is rebuilt
    pub revalidate: Duration,
    /// Cosmic content store configuration
    pub cosmic: CosmicConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Cosmic API environment tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    Production,
    #[default]
    Staging,
}

impl ApiEnvironment {
    /// Base URL of the Cosmic REST API for this tier.
    #[must_use]
    pub const fn api_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.cosmicjs.com",
            Self::Staging => "https://api.cosmic-staging.com",
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            other => Err(format!("expected 'production' or 'staging', got '{other}'")),
        }
    }
}

/// Cosmic content store configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct CosmicConfig {
    /// Bucket slug
    pub bucket_slug: String,
    /// Bucket read key
    pub read_key: SecretString,
    /// Bucket write key (the storefront is read-only and never sends it)
    pub write_key: Option<SecretString>,
    /// API environment tier
    pub environment: ApiEnvironment,
    /// Explicit API base URL, overriding the environment tier
    pub api_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl CosmicConfig {
    /// Create a configuration for a bucket with default tier and timeout.
    #[must_use]
    pub fn new(bucket_slug: impl Into<String>, read_key: impl Into<String>) -> Self {
        Self {
            bucket_slug: bucket_slug.into(),
            read_key: SecretString::from(read_key.into()),
            write_key: None,
            environment: ApiEnvironment::default(),
            api_url: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Use an explicit API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Effective API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.environment.api_url())
            .trim_end_matches('/')
    }

    /// Load the Cosmic settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the bucket slug or read key is missing, the
    /// read key looks like a placeholder, or an optional value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = get_optional_env("COSMIC_API_ENVIRONMENT")
            .map(|v| {
                v.parse::<ApiEnvironment>()
                    .map_err(|e| ConfigError::InvalidEnvVar("COSMIC_API_ENVIRONMENT".to_string(), e))
            })
            .transpose()?
            .unwrap_or_default();
        let timeout = get_env_or_default("COSMIC_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("COSMIC_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            bucket_slug: get_required_env("COSMIC_BUCKET_SLUG")?,
            read_key: get_validated_secret("COSMIC_READ_KEY")?,
            write_key: get_optional_env("COSMIC_WRITE_KEY").map(SecretString::from),
            environment,
            api_url: get_optional_env("COSMIC_API_URL"),
            timeout: Duration::from_secs(timeout),
        })
    }
}

impl std::fmt::Debug for CosmicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicConfig")
            .field("bucket_slug", &self.bucket_slug)
            .field("read_key", &"[REDACTED]")
            .field("write_key", &self.write_key.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let revalidate = get_env_or_default("PAGE_REVALIDATE_SECS", "60")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PAGE_REVALIDATE_SECS".to_string(), e.to_string())
            })?;

        let cosmic = CosmicConfig::from_env()?;

        Ok(Self {
            host,
            port,
            revalidate: Duration::from_secs(revalidate),
            cosmic,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real bucket keys are long random strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the key from the bucket settings."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
