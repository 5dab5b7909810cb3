//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod prefs;

use pelussi_storefront::config::ConfiguredCatalog;
use pelussi_storefront::{StorefrontConfig, StorefrontSession};

/// Load the configured catalog into `session`.
///
/// A catalog that cannot be fetched is logged and the command continues
/// with an empty catalog, the same as a storefront showing its error state.
/// Stdout only ever carries command output.
///
/// # Errors
///
/// Returns an error only if the catalog source cannot be constructed.
pub async fn load_catalog(
    session: &mut StorefrontSession,
    config: &StorefrontConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = ConfiguredCatalog::from_config(config)?;
    if let Err(e) = session.load_catalog(&source).await {
        tracing::warn!(error = %e, "Unable to load the catalog");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pelussi_core::CategoryFilter;
    use pelussi_storefront::config::CatalogLocation;
    use pelussi_storefront::persistence::{KeyValueStore, MemoryStore};

    use super::*;

    fn session() -> StorefrontSession {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        StorefrontSession::open(store, CategoryFilter::All)
    }

    #[tokio::test]
    async fn test_missing_catalog_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            catalog: CatalogLocation::File(dir.path().join("absent.yaml")),
            ..StorefrontConfig::default()
        };

        let mut session = session();
        load_catalog(&mut session, &config).await.unwrap();
        assert!(session.products().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":"harbor","price":120,"category":"paintings","available":true,"createdAt":"2024-04-12T09:00:00Z"}]"#,
        )
        .unwrap();
        let config = StorefrontConfig {
            catalog: CatalogLocation::File(path),
            ..StorefrontConfig::default()
        };

        let mut session = session();
        load_catalog(&mut session, &config).await.unwrap();
        assert_eq!(session.products().len(), 1);
    }
}
