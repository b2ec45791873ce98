//! Shopping cart container.
//!
//! A [`Cart`] is an ordered list of line items, unique by product id. It is
//! stored whole in the visitor's session; handlers load it, apply one of the
//! operations below, and save it back.
//!
//! Quantities are [`NonZeroU32`], so a line can never hold zero items. The
//! HTTP layer turns a requested quantity of 0 into a "Minimum quantity is 1"
//! message before the cart is touched.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};
use crate::wishlist::WishlistItem;

/// Flat shipping charged on any non-empty cart ($15.00).
pub const FLAT_SHIPPING_CENTS: i64 = 1500;

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub alt: String,
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// Build a line with quantity 1.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
        alt: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
            alt: alt.into(),
            quantity: NonZeroU32::MIN,
        }
    }

    /// `price x quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity.get())
    }
}

impl From<WishlistItem> for CartItem {
    fn from(item: WishlistItem) -> Self {
        Self::new(item.id, item.name, item.price, item.image, item.alt)
    }
}

/// Derived cart totals for the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub item_count: u64,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

/// The visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add one unit of `item`.
    ///
    /// If the product is already in the cart its quantity is incremented,
    /// otherwise the item is appended with quantity 1. Returns the line's
    /// new quantity.
    pub fn add(&mut self, item: CartItem) -> NonZeroU32 {
        self.add_quantity(item, NonZeroU32::MIN)
    }

    /// Add `quantity` units of `item` using the same merge rule as [`Cart::add`].
    ///
    /// The incoming item's own `quantity` field is ignored.
    pub fn add_quantity(&mut self, mut item: CartItem, quantity: NonZeroU32) -> NonZeroU32 {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity.get());
            return existing.quantity;
        }

        item.quantity = quantity;
        self.items.push(item);
        quantity
    }

    /// Remove the line for `id`, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let position = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(position))
    }

    /// Replace the quantity of the line for `id`.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn update_quantity(&mut self, id: ProductId, quantity: NonZeroU32) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of `price x quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Subtotal, flat shipping (only when non-empty), and grand total.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.total_price();
        let shipping = if self.is_empty() {
            Price::ZERO
        } else {
            Price::from_cents(FLAT_SHIPPING_CENTS)
        };

        CartTotals {
            item_count: self.total_items(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn plant(id: i32, cents: i64) -> CartItem {
        CartItem::new(
            ProductId::new(id),
            format!("Plant {id}"),
            Price::from_cents(cents),
            format!("https://placehold.co/300x300?text=Plant+{id}"),
            format!("Plant {id} photo"),
        )
    }

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_add_appends_with_quantity_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(plant(1, 2999)), qty(1));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, qty(1));
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        let sequence = [1, 2, 1, 3, 1, 2];
        for id in sequence {
            cart.add(plant(id, 1000));
        }

        assert_eq!(cart.items().len(), 3);
        for id in [1, 2, 3] {
            let expected = sequence.iter().filter(|&&s| s == id).count();
            let line = cart.get(ProductId::new(id)).unwrap();
            assert_eq!(line.quantity.get() as usize, expected);
        }
        assert_eq!(cart.total_items(), sequence.len() as u64);
    }

    #[test]
    fn test_add_quantity_sums_increments() {
        let mut cart = Cart::new();
        cart.add_quantity(plant(5, 2499), qty(3));
        cart.add_quantity(plant(5, 2499), qty(2));
        cart.add(plant(5, 2499));
        assert_eq!(cart.get(ProductId::new(5)).unwrap().quantity, qty(6));
    }

    #[test]
    fn test_add_ignores_incoming_quantity_field() {
        let mut cart = Cart::new();
        let mut item = plant(1, 100);
        item.quantity = qty(9);
        cart.add(item);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, qty(1));
    }

    #[test]
    fn test_remove_then_add_resets_quantity() {
        let mut cart = Cart::new();
        cart.add(plant(1, 100));
        cart.add(plant(1, 100));
        let removed = cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(removed.name, "Plant 1");
        assert!(cart.is_empty());

        cart.add(plant(1, 100));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, qty(1));
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut cart = Cart::new();
        cart.add(plant(1, 100));
        assert!(cart.remove(ProductId::new(2)).is_none());
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = Cart::new();
        cart.add(plant(1, 100));
        assert!(cart.update_quantity(ProductId::new(1), qty(4)));
        assert_eq!(cart.total_items(), 4);
        assert!(!cart.update_quantity(ProductId::new(9), qty(4)));
    }

    #[test]
    fn test_total_price_tracks_every_mutation() {
        let mut cart = Cart::new();
        cart.add(plant(1, 2999));
        cart.add(plant(1, 2999));
        cart.add(plant(2, 4999));
        assert_eq!(cart.total_price(), Price::from_cents(2999 * 2 + 4999));

        cart.update_quantity(ProductId::new(2), qty(3));
        assert_eq!(cart.total_price(), Price::from_cents(2999 * 2 + 4999 * 3));

        cart.remove(ProductId::new(1));
        assert_eq!(cart.total_price(), Price::from_cents(4999 * 3));

        let expected: Price = cart.items().iter().map(CartItem::line_total).sum();
        assert_eq!(cart.total_price(), expected);
    }

    #[test]
    fn test_totals_add_flat_shipping_only_when_non_empty() {
        let mut cart = Cart::new();
        let empty = cart.totals();
        assert_eq!(empty.shipping, Price::ZERO);
        assert_eq!(empty.total, Price::ZERO);

        cart.add(plant(1, 2999));
        let totals = cart.totals();
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.subtotal, Price::from_cents(2999));
        assert_eq!(totals.shipping, Price::from_cents(FLAT_SHIPPING_CENTS));
        assert_eq!(totals.total, Price::from_cents(4499));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(plant(1, 100));
        cart.add(plant(2, 100));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_stored_zero_quantity_is_rejected() {
        let json = r#"{"items":[{"id":1,"name":"x","price":"1.00","image":"","alt":"","quantity":0}]}"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_from_wishlist_item() {
        let item = WishlistItem {
            id: ProductId::new(3),
            name: "Monstera Deliciosa".to_string(),
            price: Price::from_cents(4999),
            image: "img".to_string(),
            alt: "alt".to_string(),
        };
        let line = CartItem::from(item);
        assert_eq!(line.quantity, qty(1));
        assert_eq!(line.price, Price::from_cents(4999));
    }
}
