//! Product page data: variants, specifications, care guide, and reviews.

use std::num::NonZeroU32;

use botanical_core::{CartItem, Page, Price, ReviewId};
use chrono::NaiveDate;
use thiserror::Error;

use super::Product;

/// Reviews shown per page on the product page.
pub const REVIEWS_PER_PAGE: usize = 5;

/// Orders above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 7500;

/// Why an add-to-cart from the product page was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("Please select size and pot style")]
    MissingSelection,
    #[error("Selected variant not available")]
    VariantUnavailable,
    #[error("Quantity cannot be less than 1")]
    QuantityTooLow,
    #[error("Cannot exceed available stock")]
    ExceedsStock,
}

/// Plant size option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Size {
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::ExtraLarge];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::ExtraLarge => "Extra Large",
        }
    }

    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "xl",
        }
    }

    /// Extra large is listed but never stocked.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        !matches!(self, Self::ExtraLarge)
    }

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.value() == value)
    }
}

/// Pot option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotStyle {
    TerraCotta,
    CeramicWhite,
    CeramicBlack,
}

impl PotStyle {
    pub const ALL: [Self; 3] = [Self::TerraCotta, Self::CeramicWhite, Self::CeramicBlack];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TerraCotta => "Terra Cotta",
            Self::CeramicWhite => "Ceramic White",
            Self::CeramicBlack => "Ceramic Black",
        }
    }

    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::TerraCotta => "terra-cotta",
            Self::CeramicWhite => "ceramic-white",
            Self::CeramicBlack => "ceramic-black",
        }
    }

    #[must_use]
    pub const fn image(&self) -> &'static str {
        match self {
            Self::TerraCotta => "https://placehold.co/600x600?text=Terra+Cotta+Pot",
            Self::CeramicWhite => "https://placehold.co/600x600?text=White+Ceramic+Pot",
            Self::CeramicBlack => "https://placehold.co/600x600?text=Black+Ceramic+Pot",
        }
    }

    const fn sku_code(&self) -> &'static str {
        match self {
            Self::TerraCotta => "TC",
            Self::CeramicWhite => "CW",
            Self::CeramicBlack => "CB",
        }
    }

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == value)
    }
}

/// A purchasable size and pot combination.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVariant {
    pub size: Size,
    pub pot_style: PotStyle,
    pub sku: String,
    pub price: Price,
    pub old_price: Option<Price>,
    pub stock: u32,
}

impl ProductVariant {
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} in {}", self.size.label(), self.pot_style.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner - Easy to care for, very forgiving.",
            Self::Intermediate => {
                "Intermediate - Needs consistent care but tolerates occasional neglect."
            }
            Self::Expert => "Expert - Requires precise and attentive care.",
        }
    }
}

/// Care guide for live plants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareInfo {
    pub light: &'static str,
    pub watering: &'static str,
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub fertilizing: &'static str,
    pub difficulty: Difficulty,
}

impl CareInfo {
    fn for_category(category: &str) -> Option<Self> {
        let info = match category {
            "Indoor Plants" => Self {
                light: "Bright, indirect light. Tolerates medium light.",
                watering: "Allow soil to dry between waterings, approximately once a week",
                temperature: "65-85°F (18-29°C)",
                humidity: "Medium to high humidity",
                fertilizing: "Monthly during growing season (spring to summer)",
                difficulty: Difficulty::Beginner,
            },
            "Outdoor Plants" => Self {
                light: "Full sun to partial shade.",
                watering: "Deep watering twice a week in summer, less in cooler months",
                temperature: "Hardy outdoors; protect from hard frost",
                humidity: "Normal outdoor humidity",
                fertilizing: "Slow-release feed in early spring",
                difficulty: Difficulty::Intermediate,
            },
            "Succulents" => Self {
                light: "Bright light with a few hours of direct sun.",
                watering: "Water only when the soil is completely dry, every 2-3 weeks",
                temperature: "60-80°F (15-27°C)",
                humidity: "Low humidity",
                fertilizing: "Diluted cactus feed twice a year",
                difficulty: Difficulty::Beginner,
            },
            "Flowering Plants" => Self {
                light: "Bright, indirect light. Avoid harsh afternoon sun.",
                watering: "Keep soil lightly moist, water when the top inch is dry",
                temperature: "65-80°F (18-27°C)",
                humidity: "Medium to high humidity",
                fertilizing: "Bloom fertilizer every two weeks while flowering",
                difficulty: Difficulty::Intermediate,
            },
            "Herbs" => Self {
                light: "At least six hours of direct sun.",
                watering: "Water when the top of the soil feels dry",
                temperature: "60-75°F (15-24°C)",
                humidity: "Normal household humidity",
                fertilizing: "Light feeding monthly; harvest often",
                difficulty: Difficulty::Beginner,
            },
            "Fruit Trees" => Self {
                light: "Full sun, at least eight hours a day.",
                watering: "Water deeply once the top two inches dry out",
                temperature: "55-85°F (13-29°C)",
                humidity: "Medium humidity",
                fertilizing: "Citrus or fruit tree feed every 4-6 weeks in season",
                difficulty: Difficulty::Expert,
            },
            _ => return None,
        };
        Some(info)
    }
}

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub author: &'static str,
    pub rating: u8,
    pub date: NaiveDate,
    pub comment: &'static str,
    pub likes: u32,
    pub verified: bool,
}

impl Review {
    #[must_use]
    pub fn stars(&self) -> Vec<bool> {
        (1..=5).map(|n| n <= self.rating).collect()
    }
}

/// Everything the product page shows.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub scientific_name: String,
    pub description: String,
    pub sku: String,
    pub stock: u32,
    pub brand: &'static str,
    pub tags: Vec<&'static str>,
    pub images: Vec<ProductImage>,
    pub variants: Vec<ProductVariant>,
    pub specifications: Vec<(&'static str, String)>,
    pub features: Vec<&'static str>,
    pub care: Option<CareInfo>,
    pub reviews: Vec<Review>,
    pub warranty: &'static str,
    pub estimated_delivery_days: u32,
}

impl ProductDetail {
    /// Expand a grid product into its detail page.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        let plant = product.is_plant();
        let variants = if plant {
            build_variants(product)
        } else {
            Vec::new()
        };
        let stock = if variants.is_empty() {
            25
        } else {
            variants.iter().map(|v| v.stock).sum()
        };
        let slug = product.name.replace(' ', "+");

        Self {
            scientific_name: scientific_name(&product.name).to_string(),
            description: format!(
                "{}. Every {} we ship is inspected by our growers, packed by hand, and \
                 delivered with instructions to help it settle into its new home.",
                product.short_description,
                if plant { "plant" } else { "item" }
            ),
            sku: format!("PLT-{:03}", product.id.as_i32()),
            stock,
            brand: "GreenThumb",
            tags: tags_for(&product.category),
            images: vec![
                ProductImage {
                    url: format!("https://placehold.co/600x600?text={slug}"),
                    alt: product.alt.clone(),
                },
                ProductImage {
                    url: format!("https://placehold.co/600x600?text={slug}+Close-up"),
                    alt: format!("{} close-up", product.name),
                },
                ProductImage {
                    url: format!("https://placehold.co/600x600?text={slug}+in+Room"),
                    alt: format!("{} in a living room setting", product.name),
                },
            ],
            specifications: specifications_for(product, plant),
            features: features_for(plant),
            care: CareInfo::for_category(&product.category),
            reviews: mock_reviews(),
            warranty: if plant {
                "30-day plant health guarantee"
            } else {
                "1-year quality guarantee"
            },
            estimated_delivery_days: 3,
            variants,
            product: product.clone(),
        }
    }

    /// First variant, preselected on page load.
    #[must_use]
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }

    #[must_use]
    pub fn variant(&self, size: &str, pot_style: &str) -> Option<&ProductVariant> {
        let size = Size::from_value(size)?;
        let pot_style = PotStyle::from_value(pot_style)?;
        self.variants
            .iter()
            .find(|v| v.size == size && v.pot_style == pot_style)
    }

    /// Validate a product-page purchase and build the cart line.
    ///
    /// Plants need both a size and a pot style naming an existing variant.
    /// The quantity must be at least 1 and no more than the stock on hand.
    ///
    /// # Errors
    ///
    /// Returns the [`PurchaseError`] whose message is shown to the visitor.
    pub fn purchase(
        &self,
        size: Option<&str>,
        pot_style: Option<&str>,
        quantity: u32,
    ) -> Result<(CartItem, NonZeroU32), PurchaseError> {
        let (price, stock) = if self.variants.is_empty() {
            (self.product.price, self.stock)
        } else {
            let (Some(size), Some(pot_style)) = (
                size.filter(|s| !s.is_empty()),
                pot_style.filter(|p| !p.is_empty()),
            ) else {
                return Err(PurchaseError::MissingSelection);
            };
            let variant = self
                .variant(size, pot_style)
                .ok_or(PurchaseError::VariantUnavailable)?;
            (variant.price, variant.stock)
        };

        let quantity = NonZeroU32::new(quantity).ok_or(PurchaseError::QuantityTooLow)?;
        if quantity.get() > stock {
            return Err(PurchaseError::ExceedsStock);
        }

        let image = self
            .images
            .first()
            .map_or_else(|| self.product.image.clone(), |i| i.url.clone());
        let item = CartItem::new(
            self.product.id,
            self.product.name.clone(),
            price,
            image,
            self.product.alt.clone(),
        );
        Ok((item, quantity))
    }

    /// One page of reviews.
    #[must_use]
    pub fn review_page(&self, page: usize) -> Page<Review> {
        Page::paginate(self.reviews.clone(), page, REVIEWS_PER_PAGE)
    }

    /// Average of the listed review ratings, one decimal.
    #[must_use]
    pub fn average_review_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        let average = f64::from(total) / self.reviews.len() as f64;
        (average * 10.0).round() / 10.0
    }

    #[must_use]
    pub fn free_shipping_threshold() -> Price {
        Price::from_cents(FREE_SHIPPING_THRESHOLD_CENTS)
    }
}

fn build_variants(product: &Product) -> Vec<ProductVariant> {
    let steps = [
        (Size::Small, PotStyle::TerraCotta, 0, 10),
        (Size::Medium, PotStyle::CeramicWhite, 2000, 8),
        (Size::Large, PotStyle::CeramicBlack, 4000, 5),
    ];
    steps
        .into_iter()
        .map(|(size, pot_style, extra_cents, stock)| {
            let extra = Price::from_cents(extra_cents);
            ProductVariant {
                size,
                pot_style,
                sku: format!(
                    "PLT-{:03}-{}-{}",
                    product.id.as_i32(),
                    size.value().to_uppercase(),
                    pot_style.sku_code()
                ),
                price: product.price + extra,
                old_price: product.old_price.map(|old| old + extra),
                stock,
            }
        })
        .collect()
}

fn scientific_name(name: &str) -> &'static str {
    match name {
        "Monstera Deliciosa" => "Monstera deliciosa",
        "Snake Plant" => "Dracaena trifasciata",
        "Fiddle Leaf Fig" => "Ficus lyrata",
        "Golden Pothos" => "Epipremnum aureum",
        "Japanese Maple" => "Acer palmatum",
        "Lavender Bush" => "Lavandula angustifolia",
        "Boxwood Shrub" => "Buxus sempervirens",
        "Echeveria Trio" => "Echeveria elegans",
        "Aloe Vera" => "Aloe barbadensis miller",
        "Jade Plant" => "Crassula ovata",
        "Zebra Haworthia" => "Haworthiopsis attenuata",
        "Peace Lily" => "Spathiphyllum wallisii",
        "Phalaenopsis Orchid" => "Phalaenopsis amabilis",
        "Red Anthurium" => "Anthurium andraeanum",
        "Sweet Basil" => "Ocimum basilicum",
        "Rosemary" => "Salvia rosmarinus",
        "Mint Collection" => "Mentha spp.",
        "Dwarf Lemon Tree" => "Citrus x meyeri",
        "Brown Turkey Fig Tree" => "Ficus carica",
        "Olive Tree" => "Olea europaea",
        "Tulip Bulbs (20 pack)" => "Tulipa gesneriana",
        _ => "",
    }
}

fn tags_for(category: &str) -> Vec<&'static str> {
    match category {
        "Indoor Plants" => vec!["Air Purifying", "Low Maintenance"],
        "Succulents" => vec!["Drought Tolerant", "Pet Friendly"],
        "Flowering Plants" => vec!["Blooming", "Gift Idea"],
        "Herbs" => vec!["Edible", "Kitchen Garden"],
        "Fruit Trees" => vec!["Edible", "Patio"],
        "Outdoor Plants" => vec!["Garden", "Hardy"],
        _ => vec!["Accessories"],
    }
}

fn specifications_for(product: &Product, plant: bool) -> Vec<(&'static str, String)> {
    if plant {
        vec![
            ("Category", product.category.clone()),
            ("Mature Height", "2-3 feet (indoor)".to_string()),
            ("Growth Rate", "Moderate".to_string()),
            ("Pot Included", "Nursery pot, decorative pot by variant".to_string()),
        ]
    } else {
        vec![
            ("Category", product.category.clone()),
            ("Brand", "GreenThumb".to_string()),
        ]
    }
}

fn features_for(plant: bool) -> Vec<&'static str> {
    if plant {
        vec![
            "Grown in our own greenhouses",
            "Shipped in protective, plastic-free packaging",
            "Delivered in nursery pot with care card",
            "Adaptable to various light conditions",
        ]
    } else {
        vec![
            "Selected by our growers",
            "Shipped in protective, plastic-free packaging",
        ]
    }
}

fn review_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn mock_reviews() -> Vec<Review> {
    let rows: [(&str, u8, (i32, u32, u32), &str, u32); 8] = [
        ("Julia Chen", 5, (2024, 4, 15), "Arrived in perfect condition! The leaves are gorgeous and it came with care instructions. It's already putting out new growth after just 3 weeks.", 24),
        ("Marcus Lee", 4, (2024, 4, 10), "Looks exactly like the pictures. Shipping was carefully done. Only giving 4 stars because I wish there were more size options available.", 12),
        ("Sophia Williams", 5, (2024, 4, 5), "Thriving in my apartment! The seller included a helpful care guide and everything was packaged perfectly. Highly recommend!", 8),
        ("Daniel Popescu", 5, (2024, 3, 28), "Second order from this shop and just as good as the first.", 6),
        ("Amelia Novak", 3, (2024, 3, 20), "Healthy, but a little smaller than I expected for the price.", 4),
        ("Ioana Marin", 4, (2024, 3, 14), "Fast delivery and very well packed. Would buy again.", 3),
        ("Liam Carter", 5, (2024, 3, 2), "Beautiful and exactly as described.", 2),
        ("Noah Fischer", 4, (2024, 2, 21), "Great quality. The care card was a nice touch.", 1),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((author, rating, (y, m, d), comment, likes), id)| Review {
            id: ReviewId::new(id),
            author,
            rating,
            date: review_date(y, m, d),
            comment,
            likes,
            verified: true,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::products::mock_products;

    fn detail(index: usize) -> ProductDetail {
        let products = mock_products();
        ProductDetail::for_product(products.get(index).unwrap())
    }

    #[test]
    fn test_plants_get_three_variants() {
        let monstera = detail(0);
        assert_eq!(monstera.variants.len(), 3);
        assert_eq!(monstera.stock, 23);
        let medium = monstera.variant("medium", "ceramic-white").unwrap();
        assert_eq!(medium.price, Price::from_cents(6999));
        assert_eq!(medium.old_price, Some(Price::from_cents(7999)));
        assert_eq!(medium.name(), "Medium in Ceramic White");
        assert!(monstera.care.is_some());
    }

    #[test]
    fn test_accessories_have_no_variants() {
        let potting_mix = detail(20);
        assert_eq!(potting_mix.product.category, "Plant Care");
        assert!(potting_mix.variants.is_empty());
        assert_eq!(potting_mix.stock, 25);
        assert!(potting_mix.care.is_none());
    }

    #[test]
    fn test_purchase_requires_selection_for_plants() {
        let monstera = detail(0);
        assert_eq!(
            monstera.purchase(None, Some("terra-cotta"), 1).unwrap_err(),
            PurchaseError::MissingSelection
        );
        assert_eq!(
            monstera.purchase(Some("xl"), Some("terra-cotta"), 1).unwrap_err(),
            PurchaseError::VariantUnavailable
        );
        assert_eq!(
            monstera.purchase(Some("small"), Some("ceramic-black"), 1).unwrap_err(),
            PurchaseError::VariantUnavailable
        );
    }

    #[test]
    fn test_purchase_quantity_bounds() {
        let monstera = detail(0);
        assert_eq!(
            monstera.purchase(Some("large"), Some("ceramic-black"), 0).unwrap_err(),
            PurchaseError::QuantityTooLow
        );
        assert_eq!(
            monstera.purchase(Some("large"), Some("ceramic-black"), 6).unwrap_err(),
            PurchaseError::ExceedsStock
        );
        let (item, quantity) = monstera
            .purchase(Some("large"), Some("ceramic-black"), 5)
            .unwrap();
        assert_eq!(quantity.get(), 5);
        assert_eq!(item.price, Price::from_cents(8999));
        assert_eq!(item.id, monstera.product.id);
    }

    #[test]
    fn test_purchase_accessory_uses_list_price() {
        let shears = detail(24);
        let (item, quantity) = shears.purchase(None, None, 2).unwrap();
        assert_eq!(item.price, shears.product.price);
        assert_eq!(quantity.get(), 2);
    }

    #[test]
    fn test_reviews_paginate_five_per_page() {
        let monstera = detail(0);
        let first = monstera.review_page(1);
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_pages, 2);
        let second = monstera.review_page(2);
        assert_eq!(second.items.len(), 3);
        assert_eq!(monstera.review_page(9).page, 2);
    }

    #[test]
    fn test_average_review_rating() {
        let monstera = detail(0);
        assert!((monstera.average_review_rating() - 4.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_review_stars() {
        let review = mock_reviews().into_iter().nth(1).unwrap();
        assert_eq!(review.stars(), vec![true, true, true, true, false]);
    }
}
