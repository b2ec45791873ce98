//! Store grid products.

use botanical_core::{Price, ProductId, WishlistItem};
use chrono::{DateTime, NaiveDate, Utc};

/// Categories offered in the store sidebar, in display order.
pub const CATEGORIES: &[&str] = &[
    "Indoor Plants",
    "Outdoor Plants",
    "Succulents",
    "Flowering Plants",
    "Herbs",
    "Fruit Trees",
    "Plant Care",
    "Pots & Planters",
    "Garden Tools",
    "Seeds & Bulbs",
];

/// A product card in the store grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub old_price: Option<Price>,
    pub image: String,
    pub alt: String,
    /// Average review score, 0.0-5.0.
    pub rating: f64,
    pub review_count: u32,
    pub category: String,
    pub short_description: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Snapshot stored in the wishlist.
    #[must_use]
    pub fn to_wishlist_item(&self) -> WishlistItem {
        WishlistItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            alt: self.alt.clone(),
        }
    }

    /// Whether the product belongs to one of the live-plant categories.
    #[must_use]
    pub fn is_plant(&self) -> bool {
        matches!(
            self.category.as_str(),
            "Indoor Plants"
                | "Outdoor Plants"
                | "Succulents"
                | "Flowering Plants"
                | "Herbs"
                | "Fruit Trees"
        )
    }
}

struct Row {
    name: &'static str,
    cents: i64,
    old_cents: Option<i64>,
    rating: f64,
    reviews: u32,
    category: &'static str,
    blurb: &'static str,
    added: (i32, u32, u32),
}

const ROWS: &[Row] = &[
    Row { name: "Monstera Deliciosa", cents: 4999, old_cents: Some(5999), rating: 4.6, reviews: 89, category: "Indoor Plants", blurb: "Stunning tropical plant with unique split leaves", added: (2024, 3, 1) },
    Row { name: "Snake Plant", cents: 2999, old_cents: Some(3999), rating: 4.5, reviews: 112, category: "Indoor Plants", blurb: "Nearly indestructible and great at purifying air", added: (2024, 2, 10) },
    Row { name: "Fiddle Leaf Fig", cents: 5999, old_cents: Some(6999), rating: 4.8, reviews: 64, category: "Indoor Plants", blurb: "Large violin-shaped leaves for a bright corner", added: (2024, 1, 20) },
    Row { name: "Golden Pothos", cents: 1999, old_cents: None, rating: 4.7, reviews: 210, category: "Indoor Plants", blurb: "Fast-trailing vine that thrives on neglect", added: (2024, 3, 12) },
    Row { name: "Japanese Maple", cents: 12999, old_cents: None, rating: 4.4, reviews: 23, category: "Outdoor Plants", blurb: "Delicate red foliage for patios and gardens", added: (2024, 2, 1) },
    Row { name: "Lavender Bush", cents: 2499, old_cents: None, rating: 4.3, reviews: 47, category: "Outdoor Plants", blurb: "Fragrant purple blooms that bees adore", added: (2024, 3, 5) },
    Row { name: "Boxwood Shrub", cents: 3999, old_cents: Some(4499), rating: 3.9, reviews: 18, category: "Outdoor Plants", blurb: "Classic evergreen for hedges and borders", added: (2023, 12, 15) },
    Row { name: "Echeveria Trio", cents: 1899, old_cents: None, rating: 4.6, reviews: 76, category: "Succulents", blurb: "Three rosette succulents in pastel tones", added: (2024, 3, 18) },
    Row { name: "Aloe Vera", cents: 1499, old_cents: None, rating: 4.2, reviews: 133, category: "Succulents", blurb: "Soothing gel-filled leaves, easy to grow", added: (2024, 1, 8) },
    Row { name: "Jade Plant", cents: 2199, old_cents: Some(2699), rating: 4.5, reviews: 58, category: "Succulents", blurb: "Glossy coin-shaped leaves said to bring luck", added: (2023, 11, 30) },
    Row { name: "Zebra Haworthia", cents: 1299, old_cents: None, rating: 3.8, reviews: 21, category: "Succulents", blurb: "Striped compact succulent for windowsills", added: (2024, 2, 22) },
    Row { name: "Peace Lily", cents: 3499, old_cents: None, rating: 4.4, reviews: 95, category: "Flowering Plants", blurb: "Elegant white blooms in low light", added: (2024, 3, 8) },
    Row { name: "Phalaenopsis Orchid", cents: 4499, old_cents: Some(5499), rating: 4.7, reviews: 142, category: "Flowering Plants", blurb: "Long-lasting flowers in a ceramic pot", added: (2024, 2, 14) },
    Row { name: "Red Anthurium", cents: 3999, old_cents: None, rating: 4.1, reviews: 37, category: "Flowering Plants", blurb: "Heart-shaped glossy red spathes", added: (2024, 1, 27) },
    Row { name: "Sweet Basil", cents: 799, old_cents: None, rating: 4.5, reviews: 61, category: "Herbs", blurb: "Kitchen essential for pesto and salads", added: (2024, 3, 20) },
    Row { name: "Rosemary", cents: 899, old_cents: None, rating: 4.3, reviews: 44, category: "Herbs", blurb: "Woody aromatic herb for roasting", added: (2024, 2, 18) },
    Row { name: "Mint Collection", cents: 1199, old_cents: None, rating: 3.6, reviews: 19, category: "Herbs", blurb: "Peppermint, spearmint, and chocolate mint", added: (2024, 1, 5) },
    Row { name: "Dwarf Lemon Tree", cents: 8999, old_cents: Some(9999), rating: 4.6, reviews: 31, category: "Fruit Trees", blurb: "Fragrant blossoms and real lemons indoors", added: (2024, 3, 2) },
    Row { name: "Brown Turkey Fig Tree", cents: 7499, old_cents: None, rating: 4.2, reviews: 15, category: "Fruit Trees", blurb: "Hardy fig with sweet summer fruit", added: (2023, 12, 1) },
    Row { name: "Olive Tree", cents: 14999, old_cents: None, rating: 4.8, reviews: 27, category: "Fruit Trees", blurb: "Silvery Mediterranean tree for sunny spots", added: (2024, 2, 25) },
    Row { name: "Organic Potting Mix", cents: 1999, old_cents: Some(2499), rating: 4.3, reviews: 35, category: "Plant Care", blurb: "Premium mix for all indoor plants", added: (2024, 1, 15) },
    Row { name: "Liquid Plant Food", cents: 1299, old_cents: None, rating: 4.0, reviews: 52, category: "Plant Care", blurb: "Balanced fertilizer for monthly feeding", added: (2023, 10, 20) },
    Row { name: "Ceramic Plant Pot - White", cents: 2499, old_cents: None, rating: 4.6, reviews: 42, category: "Pots & Planters", blurb: "Minimalist glazed pot with drainage hole", added: (2024, 2, 5) },
    Row { name: "Macrame Hanging Planter", cents: 2799, old_cents: None, rating: 4.4, reviews: 29, category: "Pots & Planters", blurb: "Handwoven cotton hanger for trailing plants", added: (2024, 3, 15) },
    Row { name: "Bypass Pruning Shears", cents: 3299, old_cents: None, rating: 4.7, reviews: 68, category: "Garden Tools", blurb: "Sharp steel blades for clean cuts", added: (2023, 11, 10) },
    Row { name: "Brass Watering Can", cents: 4599, old_cents: Some(5299), rating: 4.5, reviews: 24, category: "Garden Tools", blurb: "Long spout for precise indoor watering", added: (2024, 1, 30) },
    Row { name: "Tulip Bulbs (20 pack)", cents: 1699, old_cents: None, rating: 2.9, reviews: 12, category: "Seeds & Bulbs", blurb: "Mixed colors for spring borders", added: (2024, 3, 22) },
];

fn added_at((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Build the store catalog.
pub(super) fn mock_products() -> Vec<Product> {
    ROWS.iter()
        .zip(1..)
        .map(|(row, id)| Product {
            id: ProductId::new(id),
            name: row.name.to_string(),
            price: Price::from_cents(row.cents),
            old_price: row.old_cents.map(Price::from_cents),
            image: format!(
                "https://placehold.co/300x300?text={}",
                row.name.replace(' ', "+")
            ),
            alt: row.name.to_string(),
            rating: row.rating,
            review_count: row.reviews,
            category: row.category.to_string(),
            short_description: row.blurb.to_string(),
            created_at: added_at(row.added),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_from_one() {
        let products = mock_products();
        assert_eq!(products.len(), 27);
        for (index, product) in products.iter().enumerate() {
            assert_eq!(product.id.as_i32() as usize, index + 1);
        }
    }

    #[test]
    fn test_every_product_uses_a_known_category() {
        for product in mock_products() {
            assert!(
                CATEGORIES.contains(&product.category.as_str()),
                "{} has unknown category {}",
                product.name,
                product.category
            );
        }
    }

    #[test]
    fn test_dates_parse_and_prices_fit_default_range() {
        let epoch = DateTime::<Utc>::default();
        for product in mock_products() {
            assert_ne!(product.created_at, epoch, "{}", product.name);
            assert!(product.price <= Price::from_cents(100_000));
            assert!((0.0..=5.0).contains(&product.rating));
        }
    }

    #[test]
    fn test_sale_prices_exceed_price() {
        for product in mock_products() {
            if let Some(old) = product.old_price {
                assert!(old > product.price, "{}", product.name);
            }
        }
    }
}
