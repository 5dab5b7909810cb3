//! Catalog listing command.

#![allow(clippy::print_stdout)]

use pelussi_core::{CategoryFilter, CurrencyCode, Language};
use pelussi_storefront::StorefrontSession;

/// Overrides applied to the session filter before listing.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub category: Option<CategoryFilter>,
    pub search: Option<String>,
    pub language: Option<Language>,
}

/// Print the products visible under `options`.
///
/// A `language` override only applies to this listing; use
/// `pelussi prefs language` to change the remembered language.
pub fn list(session: &mut StorefrontSession, options: &ListOptions, currency: CurrencyCode) {
    if let Some(category) = options.category {
        session.set_active_category(category);
    }
    if let Some(query) = &options.search {
        session.set_search_query(query);
    }

    let mut filter = session.filter().clone();
    if let Some(language) = options.language {
        filter.set_active_language(language);
    }

    let visible = filter.visible(session.products());
    if visible.is_empty() {
        println!("No products match.");
        return;
    }

    for product in visible {
        let text = filter.translate(product);
        let status = if product.available { "" } else { " (sold)" };
        println!(
            "{:<28} {:<10} {:>12}  {}{}",
            product.id,
            product.category,
            product.price.display(currency),
            text.title,
            status,
        );
    }
}
