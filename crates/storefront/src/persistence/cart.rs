//! Cart persistence under the `cart-storage` namespace.

use std::sync::Arc;

use pelussi_core::{CartChange, CartLine, CartObserver};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{KeyValueStore, StoreError};

/// Namespace holding the persisted cart.
pub const CART_NAMESPACE: &str = "cart-storage";

/// Envelope version written by this build.
const CART_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct PersistedCartRef<'a> {
    version: u32,
    items: &'a [CartLine],
}

#[derive(Deserialize)]
struct PersistedCart {
    version: u32,
    #[serde(default)]
    items: Vec<CartLine>,
}

/// Loads and saves cart lines.
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CartRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted lines.
    ///
    /// Returns an empty list when nothing is stored or the stored payload is
    /// unreadable, corrupt or from another schema version. Failures are
    /// logged, never returned: a broken store must not stop the storefront.
    #[must_use]
    pub fn load(&self) -> Vec<CartLine> {
        let raw = match self.store.load(CART_NAMESPACE) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<PersistedCart>(&raw) {
            Ok(persisted) if persisted.version == CART_SCHEMA_VERSION => persisted.items,
            Ok(persisted) => {
                warn!(
                    version = persisted.version,
                    expected = CART_SCHEMA_VERSION,
                    "Persisted cart has unknown schema version, starting empty"
                );
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Persisted cart is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the persisted lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines cannot be encoded or the store write fails.
    pub fn save(&self, lines: &[CartLine]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&PersistedCartRef {
            version: CART_SCHEMA_VERSION,
            items: lines,
        })?;
        self.store.save(CART_NAMESPACE, &payload)
    }
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository")
            .field("namespace", &CART_NAMESPACE)
            .finish_non_exhaustive()
    }
}

/// Cart observer that writes every change through a [`CartRepository`].
///
/// Write failures are logged and swallowed so the cart mutation that
/// triggered them still completes.
#[derive(Debug, Clone)]
pub struct PersistCart {
    repository: CartRepository,
}

impl PersistCart {
    #[must_use]
    pub const fn new(repository: CartRepository) -> Self {
        Self { repository }
    }
}

impl CartObserver for PersistCart {
    fn on_change(&self, change: &CartChange, lines: &[CartLine]) {
        if let Err(e) = self.repository.save(lines) {
            warn!(error = %e, ?change, "Failed to persist cart, keeping in-memory state");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use pelussi_core::{Cart, Category, Price, Product, ProductId};

    use super::*;
    use crate::persistence::MemoryStore;

    fn product(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            price: Price::from_units(price),
            category: Category::Prints,
            available: true,
            images: Vec::new(),
            translations: BTreeMap::new(),
            dimensions: None,
            medium: None,
            created_at: "2024-02-02T00:00:00Z".parse().unwrap(),
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn load(&self, _namespace: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disk full".to_owned()))
        }

        fn save(&self, _namespace: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk full".to_owned()))
        }
    }

    #[test]
    fn test_load_empty_store() {
        let repo = CartRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_quantities() {
        let store = Arc::new(MemoryStore::new());
        let repo = CartRepository::new(store);
        let mut cart = Cart::new();
        cart.subscribe(PersistCart::new(repo.clone()));
        cart.add_item(&product("b", 30));
        cart.add_item(&product("a", 10));
        cart.add_item(&product("b", 30));

        let restored = Cart::restore(repo.load());
        assert_eq!(restored.lines(), cart.lines());
        assert_eq!(restored.total(), Price::from_units(70));
    }

    #[test]
    fn test_corrupt_payload_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.save(CART_NAMESPACE, "{not json").unwrap();
        assert!(CartRepository::new(store).load().is_empty());
    }

    #[test]
    fn test_unknown_version_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .save(CART_NAMESPACE, r#"{"version":99,"items":[]}"#)
            .unwrap();
        assert!(CartRepository::new(store).load().is_empty());
    }

    #[test]
    fn test_clear_persists_empty_cart() {
        let store = Arc::new(MemoryStore::new());
        let repo = CartRepository::new(store.clone());
        let mut cart = Cart::new();
        cart.subscribe(PersistCart::new(repo.clone()));
        cart.add_item(&product("a", 10));
        cart.clear();

        assert!(repo.load().is_empty());
        let raw = store.load(CART_NAMESPACE).unwrap().unwrap();
        assert_eq!(raw, r#"{"version":1,"items":[]}"#);
    }

    #[test]
    fn test_failing_store_does_not_break_cart() {
        let repo = CartRepository::new(Arc::new(FailingStore));
        let mut cart = Cart::new();
        cart.subscribe(PersistCart::new(repo.clone()));
        cart.add_item(&product("a", 10));
        cart.add_item(&product("a", 10));

        assert_eq!(cart.item_count(), 2);
        assert!(repo.load().is_empty());
        assert!(repo.save(cart.lines()).is_err());
    }
}
