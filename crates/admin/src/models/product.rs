//! Products as the back office sees them, and the products manager list.

use std::cmp::Ordering;

use botanical_core::{
    Page, Price, ProductId, SortDirection, TemplateArg, listing::compare_text, matches_query,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::components::data_table::{self, FilterOption, SortKey, TableColumn, next_direction};
use crate::models::{parse_page, utc};

/// Products shown per page in the products manager.
pub const PRODUCTS_PER_PAGE: usize = 5;

/// Categories offered by the product form.
pub const PRODUCT_CATEGORIES: [&str; 3] = ["Indoor Plants", "Accessories", "Pots"];

/// A catalog product with stock and merchandising fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub old_price: Option<Price>,
    pub image: String,
    pub rating: f64,
    pub review_count: u32,
    pub category: String,
    pub stock: u32,
    pub description: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminProduct {
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }

    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock < 10
    }
}

/// Sortable columns of the products table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Name,
    Category,
    Price,
    Stock,
    Rating,
    Created,
}

impl SortKey for ProductSort {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Category,
        Self::Price,
        Self::Stock,
        Self::Rating,
        Self::Created,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Rating => "rating",
            Self::Created => "created",
        }
    }
}

impl ProductSort {
    fn compare(self, a: &AdminProduct, b: &AdminProduct) -> Ordering {
        match self {
            Self::Name => compare_text(&a.name, &b.name),
            Self::Category => compare_text(&a.category, &b.category),
            Self::Price => a.price.cmp(&b.price),
            Self::Stock => a.stock.cmp(&b.stock),
            Self::Rating => a.rating.total_cmp(&b.rating),
            Self::Created => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Columns of the products table.
pub const PRODUCT_COLUMNS: [TableColumn<ProductSort>; 7] = [
    TableColumn::sortable("Product", ProductSort::Name),
    TableColumn::sortable("Category", ProductSort::Category),
    TableColumn::sortable("Price", ProductSort::Price),
    TableColumn::sortable("Stock", ProductSort::Stock),
    TableColumn::sortable("Rating", ProductSort::Rating),
    TableColumn::sortable("Created", ProductSort::Created),
    TableColumn::new("Actions"),
];

/// Raw query string of the products manager.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductListQuery {
    pub q: String,
    pub category: String,
    pub sort: String,
    pub dir: String,
    pub page: String,
}

/// Search, category filter, sort, and page of the products manager.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub q: String,
    /// `all` or a category name.
    pub category: String,
    pub sort: ProductSort,
    pub dir: SortDirection,
    pub page: usize,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        Self {
            q: query.q.trim().to_string(),
            category: query.category.trim().to_string(),
            sort: ProductSort::parse(&query.sort).unwrap_or_default(),
            dir: data_table::parse_direction(&query.dir).unwrap_or_default(),
            page: parse_page(&query.page),
        }
    }
}

impl ProductFilter {
    fn matches(&self, product: &AdminProduct) -> bool {
        matches_query(&self.q, &[&product.name, &product.description])
            && (data_table::is_all(&self.category) || product.category == self.category)
    }

    /// Filter, sort, and paginate.
    #[must_use]
    pub fn apply(&self, products: Vec<AdminProduct>) -> Page<AdminProduct> {
        let mut products: Vec<_> = products.into_iter().filter(|p| self.matches(p)).collect();
        products.sort_by(|a, b| self.dir.apply(self.sort.compare(a, b)));
        Page::paginate(products, self.page, PRODUCTS_PER_PAGE)
    }

    fn href(&self, page: usize, sort: ProductSort, dir: SortDirection) -> String {
        let category = if data_table::is_all(&self.category) {
            String::new()
        } else {
            self.category.clone()
        };
        let (sort, dir) = if sort == ProductSort::default() && dir == SortDirection::Asc {
            (String::new(), String::new())
        } else {
            (sort.as_str().to_string(), dir.as_str().to_string())
        };
        data_table::href(
            "/admin/products",
            &[
                ("q", self.q.clone()),
                ("category", category),
                ("sort", sort),
                ("dir", dir),
                ("page", if page > 1 { page.to_string() } else { String::new() }),
            ],
        )
    }

    #[must_use]
    pub fn page_href(&self, page: impl TemplateArg<usize>) -> String {
        self.href(page.resolve(), self.sort, self.dir)
    }

    /// Header link; the active column flips direction.
    #[must_use]
    pub fn sort_href(&self, sort: impl TemplateArg<ProductSort>) -> String {
        let sort = sort.resolve();
        self.href(1, sort, next_direction(self.sort, self.dir, sort))
    }

    /// Arrow shown next to the active column.
    #[must_use]
    pub fn arrow(&self, sort: impl TemplateArg<ProductSort>) -> &'static str {
        if self.sort == sort.resolve() {
            self.dir.arrow()
        } else {
            ""
        }
    }

    #[must_use]
    pub fn is_category(&self, value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        if data_table::is_all(value) {
            data_table::is_all(&self.category)
        } else {
            self.category == value
        }
    }
}

/// "All" plus every distinct category, in first-seen order.
#[must_use]
pub fn category_options(products: &[AdminProduct]) -> Vec<FilterOption> {
    let mut options = vec![FilterOption::all()];
    for product in products {
        if !options.iter().any(|o| o.value == product.category) {
            options.push(FilterOption::new(&product.category, &product.category));
        }
    }
    options
}

/// Submitted product form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub old_price: String,
    pub stock: String,
    pub image: String,
    pub rating: String,
    pub review_count: String,
    pub description: String,
    /// Checkbox: present (any value) when ticked.
    pub featured: Option<String>,
}

/// Validated product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub old_price: Option<Price>,
    pub stock: u32,
    pub image: String,
    pub rating: f64,
    pub review_count: u32,
    pub description: String,
    pub featured: bool,
}

/// Why a product form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductFormError {
    #[error("Product name is required")]
    MissingName,
    #[error("Please choose a category")]
    MissingCategory,
    #[error("Price must be a non-negative number")]
    InvalidPrice,
    #[error("Old price must be a non-negative number")]
    InvalidOldPrice,
    #[error("Stock must be a whole number of at least 0")]
    InvalidStock,
    #[error("Image URL is required")]
    MissingImage,
    #[error("Rating must be between 0 and 5")]
    InvalidRating,
    #[error("Review count must be a whole number of at least 0")]
    InvalidReviewCount,
}

fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Some(0);
    }
    value.parse().ok()
}

impl ProductForm {
    /// Form pre-filled from an existing product.
    #[must_use]
    pub fn from_product(product: &AdminProduct) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_input_value(),
            old_price: product
                .old_price
                .map(|p| p.to_input_value())
                .unwrap_or_default(),
            stock: product.stock.to_string(),
            image: product.image.clone(),
            rating: format!("{:.1}", product.rating),
            review_count: product.review_count.to_string(),
            description: product.description.clone(),
            featured: product.featured.then(|| "on".to_string()),
        }
    }

    /// Blank form for a new product.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            category: PRODUCT_CATEGORIES[0].to_string(),
            price: "0.00".to_string(),
            stock: "0".to_string(),
            image: "https://placehold.co/50x50".to_string(),
            rating: "0.0".to_string(),
            review_count: "0".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_featured(&self) -> bool {
        self.featured.is_some()
    }

    #[must_use]
    pub fn is_category(&self, category: impl AsRef<str>) -> bool {
        self.category == category.as_ref()
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails.
    pub fn validate(&self) -> Result<ProductDraft, ProductFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProductFormError::MissingName);
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ProductFormError::MissingCategory);
        }
        let price = Price::parse(&self.price).map_err(|_| ProductFormError::InvalidPrice)?;
        let old_price = match self.old_price.trim() {
            "" => None,
            raw => Some(Price::parse(raw).map_err(|_| ProductFormError::InvalidOldPrice)?),
        };
        let stock = parse_count(&self.stock).ok_or(ProductFormError::InvalidStock)?;
        let image = self.image.trim();
        if image.is_empty() {
            return Err(ProductFormError::MissingImage);
        }
        let rating = match self.rating.trim() {
            "" => 0.0,
            raw => raw
                .parse::<f64>()
                .ok()
                .filter(|r| (0.0..=5.0).contains(r))
                .ok_or(ProductFormError::InvalidRating)?,
        };
        let review_count =
            parse_count(&self.review_count).ok_or(ProductFormError::InvalidReviewCount)?;

        Ok(ProductDraft {
            name: name.to_string(),
            category: category.to_string(),
            price,
            old_price,
            stock,
            image: image.to_string(),
            rating,
            review_count,
            description: self.description.trim().to_string(),
            featured: self.is_featured(),
        })
    }
}

impl ProductDraft {
    /// Turn into a stored product.
    #[must_use]
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>, now: DateTime<Utc>) -> AdminProduct {
        AdminProduct {
            id,
            name: self.name,
            price: self.price,
            old_price: self.old_price,
            image: self.image,
            rating: self.rating,
            review_count: self.review_count,
            category: self.category,
            stock: self.stock,
            description: self.description,
            featured: self.featured,
            created_at,
            updated_at: now,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    (price, old_price): (i64, Option<i64>),
    (rating, review_count): (f64, u32),
    category: &str,
    stock: u32,
    description: &str,
    featured: bool,
    (created_at, updated_at): (&str, &str),
) -> AdminProduct {
    AdminProduct {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_cents(price),
        old_price: old_price.map(Price::from_cents),
        image: "https://placehold.co/50x50".to_string(),
        rating,
        review_count,
        category: category.to_string(),
        stock,
        description: description.to_string(),
        featured,
        created_at: utc(created_at),
        updated_at: utc(updated_at),
    }
}

/// Products the back office starts with.
pub(crate) fn seed_products() -> Vec<AdminProduct> {
    vec![
        product(
            1,
            "Snake Plant",
            (2999, Some(3999)),
            (4.5, 12),
            "Indoor Plants",
            15,
            "Easy-care snake plant purifies air and thrives in low light conditions.",
            true,
            ("2023-09-10T08:30:00Z", "2023-10-15T14:20:00Z"),
        ),
        product(
            2,
            "Fiddle Leaf Fig",
            (5999, Some(6999)),
            (4.8, 24),
            "Indoor Plants",
            8,
            "Dramatic foliage plant with large, violin-shaped leaves.",
            true,
            ("2023-08-15T10:15:00Z", "2023-10-12T09:30:00Z"),
        ),
        product(
            3,
            "Monstera Deliciosa",
            (4999, None),
            (4.7, 18),
            "Indoor Plants",
            12,
            "Tropical plant with dramatic split leaves and a climbing growth habit.",
            true,
            ("2023-09-05T12:45:00Z", "2023-10-10T11:20:00Z"),
        ),
        product(
            4,
            "Potting Soil Mix",
            (1999, Some(2499)),
            (4.3, 35),
            "Accessories",
            50,
            "Premium potting soil mix for indoor plants with added perlite and coconut coir.",
            false,
            ("2023-07-20T09:30:00Z", "2023-10-01T15:10:00Z"),
        ),
        product(
            5,
            "Ceramic Plant Pot - White",
            (2499, None),
            (4.6, 42),
            "Pots",
            25,
            "Minimalist ceramic pot with drainage hole and saucer.",
            false,
            ("2023-08-25T14:20:00Z", "2023-09-28T10:45:00Z"),
        ),
        product(
            6,
            "New Plant",
            (3999, None),
            (0.0, 0),
            "Indoor Plants",
            20,
            "Placeholder description for the new plant.",
            false,
            ("2023-10-20T09:00:00Z", "2023-10-20T09:00:00Z"),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filter(query: &[(&str, &str)]) -> ProductFilter {
        let mut raw = ProductListQuery::default();
        for (key, value) in query {
            let value = (*value).to_string();
            match *key {
                "q" => raw.q = value,
                "category" => raw.category = value,
                "sort" => raw.sort = value,
                "dir" => raw.dir = value,
                "page" => raw.page = value,
                _ => {}
            }
        }
        ProductFilter::from(raw)
    }

    fn names(page: &Page<AdminProduct>) -> Vec<&str> {
        page.items.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_name_ascending_five_per_page() {
        let page = filter(&[]).apply(seed_products());
        assert_eq!(page.total_items, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(
            names(&page),
            [
                "Ceramic Plant Pot - White",
                "Fiddle Leaf Fig",
                "Monstera Deliciosa",
                "New Plant",
                "Potting Soil Mix"
            ]
        );
    }

    #[test]
    fn test_search_covers_description() {
        let page = filter(&[("q", "DRAINAGE")]).apply(seed_products());
        assert_eq!(names(&page), ["Ceramic Plant Pot - White"]);
    }

    #[test]
    fn test_category_filter() {
        let page = filter(&[("category", "Pots")]).apply(seed_products());
        assert_eq!(names(&page), ["Ceramic Plant Pot - White"]);
        let page = filter(&[("category", "All")]).apply(seed_products());
        assert_eq!(page.total_items, 6);
    }

    #[test]
    fn test_numeric_sort_descending() {
        let page = filter(&[("sort", "stock"), ("dir", "desc")]).apply(seed_products());
        assert_eq!(page.items.first().map(|p| p.stock), Some(50));
    }

    #[test]
    fn test_sort_href_toggles_active_and_resets_new_column() {
        let f = filter(&[("sort", "price")]);
        assert_eq!(
            f.sort_href(ProductSort::Price),
            "/admin/products?sort=price&dir=desc"
        );
        assert_eq!(
            f.sort_href(ProductSort::Stock),
            "/admin/products?sort=stock&dir=asc"
        );
        assert_eq!(filter(&[]).sort_href(ProductSort::Name), "/admin/products?sort=name&dir=desc");
    }

    #[test]
    fn test_category_options_are_distinct() {
        let values: Vec<String> = category_options(&seed_products())
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, ["all", "Indoor Plants", "Accessories", "Pots"]);
    }

    #[test]
    fn test_form_validation() {
        let mut form = ProductForm::blank();
        assert_eq!(form.validate(), Err(ProductFormError::MissingName));

        form.name = "Pothos".to_string();
        form.price = "-1".to_string();
        assert_eq!(form.validate(), Err(ProductFormError::InvalidPrice));

        form.price = "14.50".to_string();
        form.rating = "6".to_string();
        assert_eq!(form.validate(), Err(ProductFormError::InvalidRating));

        form.rating = "4.2".to_string();
        form.featured = Some("on".to_string());
        let draft = form.validate().unwrap();
        assert_eq!(draft.price, Price::from_cents(1450));
        assert_eq!(draft.old_price, None);
        assert!(draft.featured);
    }

    #[test]
    fn test_form_round_trips_existing_product() {
        let products = seed_products();
        let first = products.first().unwrap();
        let draft = ProductForm::from_product(first).validate().unwrap();
        assert_eq!(draft.name, first.name);
        assert_eq!(draft.old_price, first.old_price);
        assert_eq!(draft.stock, first.stock);
    }
}
