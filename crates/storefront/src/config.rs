//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PELUSSI_DATA_DIR` - Directory for persisted cart and preferences (default: `.pelussi`)
//! - `PELUSSI_CATALOG` - Catalog file path or `http(s)` URL (default: `catalog.yaml`)
//! - `PELUSSI_CATALOG_TOKEN` - Bearer token for an HTTP catalog
//! - `PELUSSI_DEFAULT_CATEGORY` - Initial catalog tab (default: `all`)
//! - `PELUSSI_CURRENCY` - Currency used to display prices (default: `EUR`)

use std::path::PathBuf;

use pelussi_core::{CategoryFilter, CurrencyCode};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::catalog::{CatalogError, CatalogSource, FileCatalogSource, HttpCatalogSource};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the catalog is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    File(PathBuf),
    Http(Url),
}

impl CatalogLocation {
    /// Interpret `value` as an `http(s)` URL when it has that scheme, and as a
    /// file path otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` looks like a URL but does not parse.
    pub fn parse(value: &str) -> Result<Self, url::ParseError> {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Url::parse(value).map(Self::Http)
        } else {
            Ok(Self::File(PathBuf::from(value)))
        }
    }
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the catalog token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Catalog data source
    pub catalog: CatalogLocation,
    /// Bearer token sent to an HTTP catalog
    pub catalog_token: Option<SecretString>,
    /// Catalog tab selected when a session opens
    pub default_category: CategoryFilter,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("data_dir", &self.data_dir)
            .field("catalog", &self.catalog)
            .field(
                "catalog_token",
                &self.catalog_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("default_category", &self.default_category)
            .field("currency", &self.currency)
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog: CatalogLocation::File(PathBuf::from(DEFAULT_CATALOG)),
            catalog_token: None,
            default_category: CategoryFilter::default(),
            currency: CurrencyCode::default(),
        }
    }
}

const DEFAULT_DATA_DIR: &str = ".pelussi";
const DEFAULT_CATALOG: &str = "catalog.yaml";

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

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let data_dir = PathBuf::from(get_or_default("PELUSSI_DATA_DIR", DEFAULT_DATA_DIR));

        let catalog = CatalogLocation::parse(&get_or_default("PELUSSI_CATALOG", DEFAULT_CATALOG))
            .map_err(|e| invalid("PELUSSI_CATALOG", &e))?;

        let catalog_token = lookup("PELUSSI_CATALOG_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        let default_category = get_or_default("PELUSSI_DEFAULT_CATEGORY", "all")
            .parse::<CategoryFilter>()
            .map_err(|e| invalid("PELUSSI_DEFAULT_CATEGORY", &e))?;

        let currency = get_or_default("PELUSSI_CURRENCY", "EUR")
            .parse::<CurrencyCode>()
            .map_err(|e| invalid("PELUSSI_CURRENCY", &e))?;

        Ok(Self {
            data_dir,
            catalog,
            catalog_token,
            default_category,
            currency,
        })
    }
}

/// Either catalog source, chosen from [`CatalogLocation`].
#[derive(Debug, Clone)]
pub enum ConfiguredCatalog {
    File(FileCatalogSource),
    Http(HttpCatalogSource),
}

impl ConfiguredCatalog {
    /// Build the catalog source described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        Ok(match &config.catalog {
            CatalogLocation::File(path) => Self::File(FileCatalogSource::new(path.clone())),
            CatalogLocation::Http(url) => Self::Http(HttpCatalogSource::new(
                url.clone(),
                config.catalog_token.as_ref(),
            )?),
        })
    }
}

impl CatalogSource for ConfiguredCatalog {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, CatalogError> {
        match self {
            Self::File(source) => source.fetch().await,
            Self::Http(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(source) => source.describe(),
            Self::Http(source) => source.describe(),
        }
    }
}

fn invalid(key: &str, error: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_owned(), error.to_string())
}
