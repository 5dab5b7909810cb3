//! Catalog filtering, search and translation fallback.
//!
//! The filter is a small state holder: the active category tab, the active
//! language and an optional search query. Every transition is total and
//! instantaneous; the visible products are re-derived on demand from the
//! product list the caller passes in, which is never mutated or reordered.

use std::borrow::Cow;

use crate::types::{CategoryFilter, Language, Product, Translation};

/// Products whose category matches `filter`, in source order.
#[must_use]
pub fn visible_products(products: &[Product], filter: CategoryFilter) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| filter.matches(product.category))
        .collect()
}

/// Display text for `product` in `language`.
///
/// Falls back to [`Language::FALLBACK`], then to
/// [`Translation::placeholder`], so a title is always available.
#[must_use]
pub fn resolve_translation(product: &Product, language: Language) -> Cow<'_, Translation> {
    product
        .translation(language)
        .or_else(|| product.translation(Language::FALLBACK))
        .map_or_else(|| Cow::Owned(Translation::placeholder()), Cow::Borrowed)
}

/// Active catalog view state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    active_category: CategoryFilter,
    active_language: Language,
    search_query: Option<String>,
}

impl CatalogFilter {
    /// Create a filter starting on `category` in `language`.
    #[must_use]
    pub const fn new(category: CategoryFilter, language: Language) -> Self {
        Self {
            active_category: category,
            active_language: language,
            search_query: None,
        }
    }

    #[must_use]
    pub const fn active_category(&self) -> CategoryFilter {
        self.active_category
    }

    #[must_use]
    pub const fn active_language(&self) -> Language {
        self.active_language
    }

    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    pub fn set_active_category(&mut self, category: CategoryFilter) {
        self.active_category = category;
    }

    pub fn set_active_language(&mut self, language: Language) {
        self.active_language = language;
    }

    /// Set the text search. A blank query clears the search.
    pub fn set_search_query(&mut self, query: &str) {
        let trimmed = query.trim();
        self.search_query = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
    }

    pub fn clear_search(&mut self) {
        self.search_query = None;
    }

    /// Products shown under the active tab and search, in source order.
    ///
    /// The search is a case-insensitive substring match against the title,
    /// description and tags of the translation resolved for the active
    /// language.
    #[must_use]
    pub fn visible<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        visible_products(products, self.active_category)
            .into_iter()
            .filter(|product| self.matches_search(product))
            .collect()
    }

    /// Display text for `product` in the active language.
    #[must_use]
    pub fn translate<'a>(&self, product: &'a Product) -> Cow<'a, Translation> {
        resolve_translation(product, self.active_language)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(query) = self.search_query.as_deref() else {
            return true;
        };
        let text = self.translate(product);
        text.title.to_lowercase().contains(query)
            || text.description.to_lowercase().contains(query)
            || text
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(query))
    }
}
