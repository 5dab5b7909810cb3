//! Cart commands.

#![allow(clippy::print_stdout)]

use pelussi_core::{CurrencyCode, ProductId};
use pelussi_storefront::{Result, StorefrontSession};

/// Add one unit of a catalog product and print the cart.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog.
pub fn add(session: &mut StorefrontSession, id: &ProductId, currency: CurrencyCode) -> Result<()> {
    session.add_item(id)?;
    show(session, currency);
    Ok(())
}

pub fn remove(session: &mut StorefrontSession, id: &ProductId, currency: CurrencyCode) {
    session.remove_item(id);
    show(session, currency);
}

pub fn update(session: &mut StorefrontSession, id: &ProductId, delta: i64, currency: CurrencyCode) {
    session.update_quantity(id, delta);
    show(session, currency);
}

pub fn clear(session: &mut StorefrontSession, currency: CurrencyCode) {
    session.clear_cart();
    show(session, currency);
}

/// Print every line with its subtotal, then the totals.
pub fn show(session: &StorefrontSession, currency: CurrencyCode) {
    let cart = session.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in cart.lines() {
        let title = session.translate(line.product()).title.clone();
        println!(
            "{:<28} {:>4} x {:>12} = {:>12}  {}",
            line.id(),
            line.quantity(),
            line.product().price.display(currency),
            line.subtotal().display(currency),
            title,
        );
    }
    println!(
        "{} item(s), total {}",
        cart.item_count(),
        cart.total().display(currency)
    );
}
