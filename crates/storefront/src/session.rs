//! Storefront session context.
//!
//! A [`StorefrontSession`] owns everything one browsing session needs: the
//! cart, the catalog filter, the display preferences and the loaded product
//! list. The front end constructs one per session and passes it by reference
//! to whatever needs to read or change it.
//!
//! Opening a session restores the cart and preferences from the key-value
//! store and subscribes a [`PersistCart`] observer, so every later cart
//! change is written back without the cart knowing about storage.

use std::borrow::Cow;
use std::sync::Arc;

use pelussi_core::{
    Cart, CatalogFilter, CategoryFilter, Language, Preferences, Product, ProductId, Theme,
    Translation,
};
use tracing::{info, instrument, warn};

use crate::catalog::{self, CatalogLoad, CatalogSource};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::persistence::{
    CartRepository, FileStore, KeyValueStore, PersistCart, PreferencesRepository,
};

/// State for one browsing session.
#[derive(Debug)]
pub struct StorefrontSession {
    cart: Cart,
    filter: CatalogFilter,
    preferences: Preferences,
    preferences_repo: PreferencesRepository,
    products: Vec<Product>,
}

impl StorefrontSession {
    /// Open a session over `store`, restoring any persisted cart and
    /// preferences. The catalog starts on `default_category`.
    #[must_use]
    pub fn open(store: Arc<dyn KeyValueStore>, default_category: CategoryFilter) -> Self {
        let cart_repo = CartRepository::new(Arc::clone(&store));
        let mut cart = Cart::restore(cart_repo.load());
        cart.subscribe(PersistCart::new(cart_repo));

        let preferences_repo = PreferencesRepository::new(store);
        let preferences = preferences_repo.load();
        let filter = CatalogFilter::new(default_category, preferences.language);

        info!(
            lines = cart.len(),
            items = cart.item_count(),
            language = %preferences.language,
            theme = %preferences.theme,
            "Session opened"
        );

        Self {
            cart,
            filter,
            preferences,
            preferences_repo,
            products: Vec::new(),
        }
    }

    /// Open a session over a [`FileStore`] in the configured data directory.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::open(
            Arc::new(FileStore::new(config.data_dir.clone())),
            config.default_category,
        )
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Replace the product list from `source`.
    ///
    /// On failure the session keeps working with an empty catalog; the cart
    /// is untouched.
    ///
    /// # Errors
    ///
    /// Returns the fetch error so the caller can show an error state.
    #[instrument(skip(self, source), fields(source = %source.describe()))]
    pub async fn load_catalog<S: CatalogSource>(&mut self, source: &S) -> Result<CatalogLoad> {
        match catalog::load_catalog(source).await {
            Ok(load) => {
                self.products.clone_from(&load.products);
                Ok(load)
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, continuing with an empty catalog");
                self.products.clear();
                Err(e.into())
            }
        }
    }

    /// Replace the product list directly.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Every loaded product, in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The loaded product with `id`.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products under the active tab and search.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.visible(&self.products)
    }

    /// Display text for `product` in the session language.
    #[must_use]
    pub fn translate<'a>(&self, product: &'a Product) -> Cow<'a, Translation> {
        self.filter.translate(product)
    }

    #[must_use]
    pub const fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    #[instrument(skip(self))]
    pub fn set_active_category(&mut self, category: CategoryFilter) {
        self.filter.set_active_category(category);
    }

    #[instrument(skip(self))]
    pub fn set_search_query(&mut self, query: &str) {
        self.filter.set_search_query(query);
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of the loaded product with `id`.
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound` if `id` is not in the loaded catalog.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, id: &ProductId) -> Result<()> {
        let product = self
            .products
            .iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?;
        self.cart.add_item(product);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &ProductId) {
        self.cart.remove_item(id);
    }

    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        self.cart.update_quantity(id, delta);
    }

    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    #[must_use]
    pub const fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Switch the session language for catalog text and persist it.
    #[instrument(skip(self))]
    pub fn set_language(&mut self, language: Language) {
        self.filter.set_active_language(language);
        self.preferences.language = language;
        self.persist_preferences();
    }

    /// Switch the color theme and persist it.
    #[instrument(skip(self))]
    pub fn set_theme(&mut self, theme: Theme) {
        self.preferences.theme = theme;
        self.persist_preferences();
    }

    fn persist_preferences(&self) {
        if let Err(e) = self.preferences_repo.save(&self.preferences) {
            warn!(error = %e, "Failed to persist preferences, keeping in-memory state");
        }
    }
}
