//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPSHIFTER_STORAGE` - `file`, `memory`, or `none` (default: file)
//! - `SHOPSHIFTER_DATA_DIR` - Directory for file storage (default: .shopshifter)
//! - `SHOPSHIFTER_SAVE_DEBOUNCE_MS` - Cart save quiescence window (default: 1000)
//! - `CATALOG_BASE_URL` - Catalog API root (default: <https://fakestoreapi.com>)
//! - `CATALOG_CACHE_TTL_SECS` - Catalog response cache TTL (default: 300)
//! - `CATALOG_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend to persist to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// JSON file under the data directory.
    #[default]
    File,
    /// Process memory; nothing survives the process.
    Memory,
    /// No storage; persistence is a silent no-op.
    None,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "none" => Ok(Self::None),
            other => Err(format!("expected file, memory, or none (got {other:?})")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Storage backend for sessions, carts, and demo users
    pub storage: StorageBackend,
    /// Directory holding the storage file
    pub data_dir: PathBuf,
    /// Quiescence window before a cart change is saved
    pub save_debounce: Duration,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. <https://fakestoreapi.com>
    pub base_url: Url,
    /// How long catalog responses stay cached
    pub cache_ttl: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            save_debounce: Duration::from_millis(DEFAULT_SAVE_DEBOUNCE_MS),
            catalog: CatalogConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_CATALOG_URL).expect("default catalog URL is valid"),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

const DEFAULT_DATA_DIR: &str = ".shopshifter";
const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 1000;
const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage = parse_or("SHOPSHIFTER_STORAGE", &lookup, defaults.storage)?;
        let data_dir = lookup("SHOPSHIFTER_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let save_debounce = Duration::from_millis(parse_or(
            "SHOPSHIFTER_SAVE_DEBOUNCE_MS",
            &lookup,
            DEFAULT_SAVE_DEBOUNCE_MS,
        )?);

        let catalog = CatalogConfig {
            base_url: parse_or("CATALOG_BASE_URL", &lookup, defaults.catalog.base_url)?,
            cache_ttl: Duration::from_secs(parse_or(
                "CATALOG_CACHE_TTL_SECS",
                &lookup,
                DEFAULT_CACHE_TTL_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_or(
                "CATALOG_TIMEOUT_SECS",
                &lookup,
                DEFAULT_TIMEOUT_SECS,
            )?),
        };
        if catalog.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_BASE_URL".to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }

        Ok(Self {
            storage,
            data_dir,
            save_debounce,
            catalog,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, otherwise use `default`.
fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
