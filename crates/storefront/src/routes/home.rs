//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use botanical_core::Wishlist;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Product;
use crate::client_state;
use crate::content::{self, Blurb, Testimonial};
use crate::error::Result;
use crate::filters;
use crate::messages::MessageQuery;
use crate::middleware::OptionalAuth;
use crate::routes::PageContext;
use crate::state::AppState;

/// Products shown in the "new arrivals" row.
const NEW_ARRIVALS: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub new_arrivals: Vec<Product>,
    pub wishlist: Wishlist,
    pub why_choose_us: [Blurb; 3],
    pub testimonials: [Testimonial; 3],
    pub return_to: &'static str,
}

impl HomeTemplate {
    #[must_use]
    pub fn in_wishlist(&self, product: &Product) -> bool {
        self.wishlist.contains(product.id)
    }
}

/// Display the home page.
#[instrument(skip(state, session, user, query))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<HomeTemplate> {
    Ok(HomeTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
        new_arrivals: state.catalog().new_arrivals(NEW_ARRIVALS).await,
        wishlist: client_state::load_wishlist(&session).await?,
        why_choose_us: content::WHY_CHOOSE_US,
        testimonials: content::TESTIMONIALS,
        return_to: "/",
    })
}
