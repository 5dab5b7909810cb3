//! Catalog loading, filtering and cart flow through a session.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use pelussi_core::{Category, CategoryFilter, Language, ProductId};
use pelussi_integration_tests::{gallery_records, invalid_records};
use pelussi_storefront::catalog::{FileCatalogSource, RejectReason};
use pelussi_storefront::persistence::{KeyValueStore, MemoryStore};
use pelussi_storefront::{StorefrontError, StorefrontSession};

fn session() -> StorefrontSession {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    StorefrontSession::open(store, CategoryFilter::All)
}

fn write_yaml_catalog(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let mut records = gallery_records();
    records.extend(invalid_records());
    let path = dir.path().join("catalog.yaml");
    std::fs::write(&path, serde_yaml::to_string(&records).unwrap()).unwrap();
    path
}

fn visible_ids(session: &StorefrontSession) -> Vec<String> {
    session
        .visible_products()
        .iter()
        .map(|product| product.id.to_string())
        .collect()
}

#[tokio::test]
async fn test_yaml_catalog_loads_and_reports_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileCatalogSource::new(write_yaml_catalog(&dir));

    let mut session = session();
    let load = session.load_catalog(&source).await.unwrap();

    assert_eq!(load.products.len(), 5);
    assert_eq!(load.rejected.len(), 2);
    assert_eq!(load.rejected[0].id.as_deref(), Some("no-price"));
    assert!(matches!(load.rejected[1].reason, RejectReason::DuplicateId));
    assert_eq!(session.products().len(), 5);
}

#[tokio::test]
async fn test_missing_catalog_leaves_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileCatalogSource::new(dir.path().join("absent.yaml"));

    let mut session = session();
    session.set_products(pelussi_storefront::catalog::parse_catalog(gallery_records()).products);
    assert!(matches!(
        session.load_catalog(&source).await,
        Err(StorefrontError::Catalog(_))
    ));
    assert!(session.products().is_empty());
    assert!(session.visible_products().is_empty());
}

#[tokio::test]
async fn test_category_tabs_and_search() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileCatalogSource::new(write_yaml_catalog(&dir));
    let mut session = session();
    session.load_catalog(&source).await.unwrap();

    assert_eq!(
        visible_ids(&session),
        [
            "harbor-at-dawn",
            "silver-leaf-ring",
            "night-garden",
            "olive-grove",
            "lyon-rooftops"
        ]
    );

    session.set_active_category(Category::Paintings.into());
    assert_eq!(visible_ids(&session), ["harbor-at-dawn", "olive-grove"]);

    session.set_search_query("  OLIVE ");
    assert_eq!(visible_ids(&session), ["olive-grove"]);

    session.set_active_category(Category::Digital.into());
    assert!(visible_ids(&session).is_empty());

    session.set_active_category(CategoryFilter::All);
    session.set_search_query("");
    assert_eq!(visible_ids(&session).len(), 5);
}

#[tokio::test]
async fn test_translation_fallback_per_language() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileCatalogSource::new(write_yaml_catalog(&dir));
    let mut session = session();
    session.load_catalog(&source).await.unwrap();

    let title = |session: &StorefrontSession, id: &str| {
        let product = session.product(&ProductId::parse(id).unwrap()).unwrap();
        session.translate(product).title.clone()
    };

    // French is the default session language
    assert_eq!(title(&session, "harbor-at-dawn"), "Port à l'aube");
    assert_eq!(title(&session, "silver-leaf-ring"), "Silver leaf ring");
    assert_eq!(title(&session, "night-garden"), "Untitled");

    session.set_language(Language::De);
    assert_eq!(title(&session, "olive-grove"), "Olivenhain");
    assert_eq!(title(&session, "harbor-at-dawn"), "Harbor at dawn");
    // Only French exists and it is not the fallback
    assert_eq!(title(&session, "lyon-rooftops"), "Untitled");
}

#[tokio::test]
async fn test_unavailable_products_stay_listed_and_addable() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileCatalogSource::new(write_yaml_catalog(&dir));
    let mut session = session();
    session.load_catalog(&source).await.unwrap();

    let night = ProductId::parse("night-garden").unwrap();
    assert!(!session.product(&night).unwrap().available);
    assert!(visible_ids(&session).contains(&"night-garden".to_owned()));

    session.add_item(&night).unwrap();
    assert_eq!(session.cart().item_count(), 1);
}

#[tokio::test]
async fn test_add_item_requires_loaded_product() {
    let mut session = session();
    let result = session.add_item(&ProductId::parse("harbor-at-dawn").unwrap());
    assert!(matches!(result, Err(StorefrontError::ProductNotFound(_))));
    assert!(session.cart().is_empty());
}

#[test]
fn test_partial_translations_keep_product_listed() {
    let mut records = gallery_records();
    records.push(serde_json::json!({
        "id": "dune-study",
        "price": 60,
        "category": "prints",
        "available": true,
        "translations": {
            "en": { "title": "Dune study" },
            "es": { "title": "Estudio de duna" },
            "de": { "title": "" }
        },
        "createdAt": "2024-09-01T12:00:00Z"
    }));
    let load = pelussi_storefront::catalog::parse_catalog(records);
    assert!(load.rejected.is_empty());

    let mut session = session();
    session.set_products(load.products);
    session.set_language(Language::De);
    session.set_active_category(Category::Prints.into());

    let dune = session.product(&ProductId::parse("dune-study").unwrap()).unwrap();
    assert_eq!(session.translate(dune).title, "Dune study");
    assert_eq!(visible_ids(&session), ["lyon-rooftops", "dune-study"]);
}
