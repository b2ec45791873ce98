//! Per-visitor state stored in the session.
//!
//! Handlers load a container, apply one operation, and save it back. The
//! cart and account book are stored as session values; the wishlist is
//! stored as the JSON text of its item array so a corrupt value can be
//! detected and reset without failing the request.

use botanical_core::{AccountBook, Cart, Wishlist, session::keys};
use tower_sessions::Session;

use crate::catalog::Catalog;
use crate::error::Result;

/// Load the cart, starting empty.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    match session.get::<Cart>(keys::CART).await {
        Ok(cart) => Ok(cart.unwrap_or_default()),
        Err(tower_sessions::session::Error::SerdeJson(error)) => {
            tracing::warn!(%error, "Discarding unreadable cart");
            session.remove_value(keys::CART).await?;
            Ok(Cart::default())
        }
        Err(error) => Err(error.into()),
    }
}

/// Save the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Load the wishlist.
///
/// Corrupt stored JSON is logged, removed, and replaced by an empty
/// wishlist.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_wishlist(session: &Session) -> Result<Wishlist> {
    let raw = match session.get::<String>(keys::WISHLIST).await {
        Ok(raw) => raw,
        Err(tower_sessions::session::Error::SerdeJson(error)) => {
            tracing::warn!(%error, "Wishlist session value is not a string");
            session.remove_value(keys::WISHLIST).await?;
            return Ok(Wishlist::default());
        }
        Err(error) => return Err(error.into()),
    };

    let restored = Wishlist::restore(raw.as_deref());
    if let Some(error) = restored.discarded {
        tracing::warn!(%error, "Discarding corrupt wishlist");
        session.remove_value(keys::WISHLIST).await?;
    }
    Ok(restored.wishlist)
}

/// Save the wishlist as JSON text.
///
/// # Errors
///
/// Returns an error if serialization or the session write fails.
pub async fn save_wishlist(session: &Session, wishlist: &Wishlist) -> Result<()> {
    session.insert(keys::WISHLIST, wishlist.to_json()?).await?;
    Ok(())
}

/// Load the account book, seeding it from the catalog on first use.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn load_account(session: &Session, catalog: &Catalog) -> Result<AccountBook> {
    match session.get::<AccountBook>(keys::ACCOUNT).await {
        Ok(Some(book)) => Ok(book),
        Ok(None) | Err(tower_sessions::session::Error::SerdeJson(_)) => {
            let book = catalog.starter_account().await;
            save_account(session, &book).await?;
            Ok(book)
        }
        Err(error) => Err(error.into()),
    }
}

/// Save the account book.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_account(session: &Session, book: &AccountBook) -> Result<()> {
    session.insert(keys::ACCOUNT, book).await?;
    Ok(())
}

/// Badge counts for the navbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badges {
    pub cart: u64,
    pub wishlist: usize,
}

/// Load the cart and wishlist sizes shown in the navbar.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_badges(session: &Session) -> Result<Badges> {
    Ok(Badges {
        cart: load_cart(session).await?.total_items(),
        wishlist: load_wishlist(session).await?.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use botanical_core::{CartItem, Price, ProductId, WishlistItem};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn wish(id: i32) -> WishlistItem {
        WishlistItem {
            id: ProductId::new(id),
            name: format!("Plant {id}"),
            price: Price::from_cents(1999),
            image: String::new(),
            alt: String::new(),
        }
    }

    #[tokio::test]
    async fn test_cart_round_trip() {
        let session = session();
        assert!(load_cart(&session).await.unwrap().is_empty());

        let mut cart = Cart::default();
        cart.add(CartItem::new(
            ProductId::new(1),
            "Monstera",
            Price::from_cents(4999),
            "",
            "",
        ));
        cart.add(CartItem::new(
            ProductId::new(1),
            "Monstera",
            Price::from_cents(4999),
            "",
            "",
        ));
        save_cart(&session, &cart).await.unwrap();

        let loaded = load_cart(&session).await.unwrap();
        assert_eq!(loaded.total_items(), 2);
        assert_eq!(loaded.items().len(), 1);
    }

    #[tokio::test]
    async fn test_wishlist_is_stored_as_json_text() {
        let session = session();
        let mut wishlist = Wishlist::default();
        wishlist.add(wish(1));
        wishlist.add(wish(2));
        save_wishlist(&session, &wishlist).await.unwrap();

        let raw: String = session.get(keys::WISHLIST).await.unwrap().unwrap();
        assert!(raw.starts_with('['));

        let loaded = load_wishlist(&session).await.unwrap();
        assert!(loaded.contains(ProductId::new(1)));
        assert!(loaded.contains(ProductId::new(2)));
    }

    #[tokio::test]
    async fn test_corrupt_wishlist_resets_and_clears_key() {
        let session = session();
        session
            .insert(keys::WISHLIST, "{not json")
            .await
            .unwrap();

        let loaded = load_wishlist(&session).await.unwrap();
        assert!(loaded.is_empty());
        assert_eq!(session.get::<String>(keys::WISHLIST).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_string_wishlist_resets() {
        let session = session();
        session.insert(keys::WISHLIST, 42).await.unwrap();
        assert!(load_wishlist(&session).await.unwrap().is_empty());
        assert_eq!(session.get::<String>(keys::WISHLIST).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_account_is_seeded_once() {
        let session = session();
        let catalog = Catalog::new(Duration::ZERO);

        let mut book = load_account(&session, &catalog).await.unwrap();
        assert_eq!(book.addresses.len(), 2);

        book.remove_address(book.addresses.get(1).unwrap().id).unwrap();
        save_account(&session, &book).await.unwrap();

        let reloaded = load_account(&session, &catalog).await.unwrap();
        assert_eq!(reloaded.addresses.len(), 1);
    }

    #[tokio::test]
    async fn test_badges() {
        let session = session();
        let mut wishlist = Wishlist::default();
        wishlist.add(wish(3));
        save_wishlist(&session, &wishlist).await.unwrap();

        let badges = load_badges(&session).await.unwrap();
        assert_eq!(badges, Badges { cart: 0, wishlist: 1 });
    }
}
