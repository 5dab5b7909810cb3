//! Shopping cart engine.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with at most one line per
//! product and every quantity at least 1. The first add of a product fixes
//! its position; later adds only bump the quantity.
//!
//! The cart performs no I/O. Every state change is announced to the
//! registered [`CartObserver`]s together with the resulting lines, which is
//! how the storefront persists the cart without the engine knowing about
//! storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{Price, Product, ProductId};

/// One product in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product on this line.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// The product id on this line.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Number of units, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// A state change applied to a [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A product was added; `quantity` is the line's new quantity.
    ItemAdded { id: ProductId, quantity: u32 },
    /// A line was removed.
    ItemRemoved { id: ProductId },
    /// A line's quantity changed.
    QuantityChanged { id: ProductId, from: u32, to: u32 },
    /// Every line was removed.
    Cleared,
}

/// Receives every state change applied to a [`Cart`].
///
/// Observers cannot fail the mutation that notified them; anything that can
/// go wrong (such as a storage write) must be handled inside the observer.
pub trait CartObserver {
    /// Called after `change` has been applied; `lines` is the new cart state.
    fn on_change(&self, change: &CartChange, lines: &[CartLine]);
}

impl<F> CartObserver for F
where
    F: Fn(&CartChange, &[CartLine]),
{
    fn on_change(&self, change: &CartChange, lines: &[CartLine]) {
        self(change, lines);
    }
}

/// The shopping cart.
#[derive(Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously persisted lines.
    ///
    /// Order is preserved. Lines that break the cart invariants are repaired
    /// rather than dropped: a zero quantity becomes 1, and a repeated product
    /// id is merged into its first occurrence by summing quantities.
    #[must_use]
    pub fn restore(lines: Vec<CartLine>) -> Self {
        let mut restored: Vec<CartLine> = Vec::with_capacity(lines.len());
        for mut line in lines {
            if line.quantity == 0 {
                warn!(product_id = %line.id(), "Restored cart line had zero quantity");
                line.quantity = 1;
            }
            if let Some(existing) = restored.iter_mut().find(|l| l.id() == line.id()) {
                warn!(product_id = %line.id(), "Merged duplicate restored cart line");
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            } else {
                restored.push(line);
            }
        }
        Self {
            lines: restored,
            observers: Vec::new(),
        }
    }

    /// Register an observer for every subsequent change.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add one unit of `product`.
    ///
    /// Appends a new line with quantity 1, or increments the existing line
    /// for the same product id without moving it. A line already at
    /// `u32::MAX` is left as is and nothing is announced.
    pub fn add_item(&mut self, product: &Product) {
        let quantity = if let Some(line) = self.line_mut(&product.id) {
            let Some(next) = line.quantity.checked_add(1) else {
                return;
            };
            line.quantity = next;
            next
        } else {
            self.lines.push(CartLine::new(product.clone()));
            1
        };
        debug!(product_id = %product.id, quantity, "Added item to cart");
        self.notify(&CartChange::ItemAdded {
            id: product.id.clone(),
            quantity,
        });
    }

    /// Remove the line for `id`. Does nothing if there is no such line.
    pub fn remove_item(&mut self, id: &ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        if self.lines.len() == before {
            return;
        }
        debug!(product_id = %id, "Removed item from cart");
        self.notify(&CartChange::ItemRemoved { id: id.clone() });
    }

    /// Adjust the quantity for `id` by `delta`, never going below 1.
    ///
    /// Decrementing to zero or below clamps the quantity to 1; removing a
    /// line is only done by [`Cart::remove_item`]. Does nothing if there is
    /// no line for `id`.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        let Some(line) = self.line_mut(id) else {
            return;
        };
        let from = line.quantity;
        let to = clamp_quantity(i64::from(from).saturating_add(delta));
        if to == from {
            return;
        }
        line.quantity = to;
        debug!(product_id = %id, from, to, "Updated cart quantity");
        self.notify(&CartChange::QuantityChanged {
            id: id.clone(),
            from,
            to,
        });
    }

    /// Remove every line.
    ///
    /// Observers are notified even when the cart was already empty so the
    /// persisted copy is always reset.
    pub fn clear(&mut self) {
        self.lines.clear();
        debug!("Cleared cart");
        self.notify(&CartChange::Cleared);
    }

    /// Sum of `price * quantity` over every line.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities over every line.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }

    fn notify(&self, change: &CartChange) {
        for observer in &self.observers {
            observer.on_change(change, &self.lines);
        }
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn clamp_quantity(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}
