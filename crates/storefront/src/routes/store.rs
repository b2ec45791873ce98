//! Store grid: search, category/price/rating filters, sort, and pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, RawQuery, State};
use botanical_core::{
    Page, Price, SortDirection, TemplateArg, Wishlist, listing::compare_text, matches_query,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{CATEGORIES, Product};
use crate::client_state;
use crate::error::Result;
use crate::filters;
use crate::messages::MessageQuery;
use crate::middleware::OptionalAuth;
use crate::routes::PageContext;
use crate::state::AppState;

/// Page sizes offered by the grid.
pub const PER_PAGE_OPTIONS: [usize; 3] = [12, 24, 36];

const DEFAULT_MAX_PRICE_CENTS: i64 = 100_000;

/// Sort key for the store grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreSort {
    /// Catalog order.
    #[default]
    Featured,
    Price,
    Rating,
    Name,
}

impl StoreSort {
    pub const ALL: [Self; 4] = [Self::Featured, Self::Price, Self::Rating, Self::Name];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Name => "name",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::Price => "Price",
            Self::Rating => "Rating",
            Self::Name => "Name",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Filters, sort, and page chosen on the store grid.
///
/// Parsed from the raw query string because `category` repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFilter {
    pub q: String,
    pub categories: Vec<String>,
    pub min_price: Price,
    pub max_price: Price,
    /// Minimum whole-star rating; 0 means any.
    pub min_rating: u8,
    pub sort: StoreSort,
    pub dir: SortDirection,
    pub page: usize,
    pub per_page: usize,
}

impl Default for StoreFilter {
    fn default() -> Self {
        Self {
            q: String::new(),
            categories: Vec::new(),
            min_price: Price::ZERO,
            max_price: Price::from_cents(DEFAULT_MAX_PRICE_CENTS),
            min_rating: 0,
            sort: StoreSort::default(),
            dir: SortDirection::default(),
            page: 1,
            per_page: 12,
        }
    }
}

impl StoreFilter {
    /// Parse a query string. Unknown keys and malformed values are ignored.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        let mut filter = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = value.trim();
            match key.as_ref() {
                "q" => filter.q = value.to_string(),
                "category" => {
                    if CATEGORIES.contains(&value) && !filter.categories.iter().any(|c| c == value)
                    {
                        filter.categories.push(value.to_string());
                    }
                }
                "min_price" => {
                    if let Ok(price) = Price::parse(value) {
                        filter.min_price = price;
                    }
                }
                "max_price" => {
                    if let Ok(price) = Price::parse(value) {
                        filter.max_price = price;
                    }
                }
                "rating" => filter.min_rating = value.parse::<u8>().map_or(0, |r| r.min(5)),
                "sort" => filter.sort = StoreSort::parse(value).unwrap_or_default(),
                "dir" => {
                    filter.dir = if value == "desc" {
                        SortDirection::Desc
                    } else {
                        SortDirection::Asc
                    };
                }
                "page" => filter.page = value.parse().unwrap_or(1),
                "per_page" => {
                    filter.per_page = value
                        .parse()
                        .ok()
                        .filter(|n| PER_PAGE_OPTIONS.contains(n))
                        .unwrap_or(12);
                }
                _ => {}
            }
        }
        filter
    }

    fn matches(&self, product: &Product) -> bool {
        matches_query(&self.q, &[&product.name])
            && (self.categories.is_empty() || self.categories.contains(&product.category))
            && product.price >= self.min_price
            && product.price <= self.max_price
            && product.rating.floor() >= f64::from(self.min_rating)
    }

    /// Filter, sort, and paginate.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Page<Product> {
        let mut products: Vec<_> = products.into_iter().filter(|p| self.matches(p)).collect();
        match self.sort {
            StoreSort::Featured => {}
            StoreSort::Price => products.sort_by(|a, b| self.dir.apply(a.price.cmp(&b.price))),
            StoreSort::Rating => {
                products.sort_by(|a, b| self.dir.apply(a.rating.total_cmp(&b.rating)));
            }
            StoreSort::Name => {
                products.sort_by(|a, b| self.dir.apply(compare_text(&a.name, &b.name)));
            }
        }
        Page::paginate(products, self.page, self.per_page)
    }

    /// Whether anything differs from the unfiltered grid.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        let default = Self::default();
        !self.q.is_empty()
            || !self.categories.is_empty()
            || self.min_price != default.min_price
            || self.max_price != default.max_price
            || self.min_rating != 0
    }

    /// Query string for these filters on another page (or with another sort).
    #[must_use]
    pub fn href(&self, page: usize, sort: StoreSort, dir: SortDirection) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if !self.q.is_empty() {
            query.append_pair("q", &self.q);
        }
        for category in &self.categories {
            query.append_pair("category", category);
        }
        let default = Self::default();
        if self.min_price != default.min_price {
            query.append_pair("min_price", &self.min_price.to_input_value());
        }
        if self.max_price != default.max_price {
            query.append_pair("max_price", &self.max_price.to_input_value());
        }
        if self.min_rating > 0 {
            query.append_pair("rating", &self.min_rating.to_string());
        }
        if sort != StoreSort::Featured {
            query.append_pair("sort", sort.as_str());
            query.append_pair("dir", dir.as_str());
        }
        if self.per_page != default.per_page {
            query.append_pair("per_page", &self.per_page.to_string());
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
        let query = query.finish();
        if query.is_empty() {
            "/store".to_string()
        } else {
            format!("/store?{query}")
        }
    }

    #[must_use]
    pub fn page_href(&self, page: impl TemplateArg<usize>) -> String {
        self.href(page.resolve(), self.sort, self.dir)
    }

    /// Link for a sort option; the active option flips direction.
    #[must_use]
    pub fn sort_href(&self, sort: impl TemplateArg<StoreSort>) -> String {
        let sort = sort.resolve();
        let dir = self.dir.after_click(&self.sort, &sort);
        self.href(1, sort, dir)
    }

    #[must_use]
    pub fn is_sort(&self, sort: impl TemplateArg<StoreSort>) -> bool {
        self.sort == sort.resolve()
    }

    #[must_use]
    pub fn is_per_page(&self, per_page: impl TemplateArg<usize>) -> bool {
        self.per_page == per_page.resolve()
    }

    #[must_use]
    pub fn is_min_rating(&self, rating: impl TemplateArg<u8>) -> bool {
        self.min_rating == rating.resolve()
    }

    #[must_use]
    pub fn has_category(&self, category: impl AsRef<str>) -> bool {
        self.categories.iter().any(|c| c == category.as_ref())
    }
}

/// Store grid template.
#[derive(Template, WebTemplate)]
#[template(path = "store/index.html")]
pub struct StoreTemplate {
    pub ctx: PageContext,
    pub filter: StoreFilter,
    pub page: Page<Product>,
    pub categories: &'static [&'static str],
    pub sorts: [StoreSort; 4],
    pub per_page_options: [usize; 3],
    pub ratings: [u8; 4],
    pub wishlist: Wishlist,
    pub return_to: String,
}

impl StoreTemplate {
    #[must_use]
    pub fn in_wishlist(&self, product: &Product) -> bool {
        self.wishlist.contains(product.id)
    }
}

/// Display the store grid.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    RawQuery(raw): RawQuery,
    Query(messages): Query<MessageQuery>,
) -> Result<StoreTemplate> {
    let filter = StoreFilter::from_query(raw.as_deref().unwrap_or_default());
    let page = filter.apply(state.catalog().products().await);
    let wishlist = client_state::load_wishlist(&session).await?;

    tracing::debug!(
        results = page.total_items,
        page = page.page,
        "Store grid filtered"
    );

    Ok(StoreTemplate {
        ctx: PageContext::load(&session, user, &messages).await?,
        return_to: filter.page_href(page.page),
        filter,
        page,
        categories: CATEGORIES,
        sorts: StoreSort::ALL,
        per_page_options: PER_PAGE_OPTIONS,
        ratings: [4, 3, 2, 1],
        wishlist,
    })
}
