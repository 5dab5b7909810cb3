//! Unified error handling.
//!
//! Provides a unified `StorefrontError` for the operations a front end
//! calls on a session. Persistence failures inside cart mutations never
//! reach this type; they are logged and swallowed where they happen.

use pelussi_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::persistence::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog fetch failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persistence operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The product is not in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
