//! Wishlist container.
//!
//! The wishlist is a set of product snapshots keyed by product id. It is
//! persisted as the JSON text of its item array (the same shape a browser
//! would keep in local storage), loaded on every request and saved after
//! every change.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A favorited product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub alt: String,
}

/// Result of loading a persisted wishlist.
#[derive(Debug)]
pub struct RestoredWishlist {
    pub wishlist: Wishlist,
    /// Set when the stored text could not be parsed and was discarded.
    pub discarded: Option<serde_json::Error>,
}

/// The visitor's wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the product is already favorited.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Add an item. Adding an id that is already present is a no-op.
    ///
    /// Returns `true` if the item was inserted.
    pub fn add(&mut self, item: WishlistItem) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item for `id`, returning it if present.
    pub fn remove(&mut self, id: ProductId) -> Option<WishlistItem> {
        let position = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(position))
    }

    /// Add the item if absent, remove it if present.
    ///
    /// Returns `true` if the item is in the wishlist afterwards.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        if self.remove(item.id).is_some() {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Serialize the item array for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    /// Load a wishlist from its stored JSON text.
    ///
    /// Missing text yields an empty wishlist. Text that does not parse is
    /// discarded: the caller gets an empty wishlist plus the parse error so
    /// it can log the failure and clear the stored value. Duplicate ids in
    /// otherwise valid text keep their first occurrence.
    #[must_use]
    pub fn restore(raw: Option<&str>) -> RestoredWishlist {
        let Some(raw) = raw else {
            return RestoredWishlist {
                wishlist: Self::new(),
                discarded: None,
            };
        };

        match serde_json::from_str::<Vec<WishlistItem>>(raw) {
            Ok(stored) => {
                let mut wishlist = Self::new();
                for item in stored {
                    wishlist.add(item);
                }
                RestoredWishlist {
                    wishlist,
                    discarded: None,
                }
            }
            Err(error) => RestoredWishlist {
                wishlist: Self::new(),
                discarded: Some(error),
            },
        }
    }
}
