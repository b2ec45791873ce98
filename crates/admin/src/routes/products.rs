//! Products manager route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use botanical_core::ProductId;
use chrono::Utc;
use tracing::instrument;

use crate::components::data_table::{FilterOption, SortKey, TableColumn};
use crate::error::Result;
use crate::filters;
use crate::messages::{self, MessageQuery};
use crate::middleware::RequireAdmin;
use crate::models::{
    AdminProduct, ProductFilter, ProductForm, ProductSort,
    product::{PRODUCT_CATEGORIES, PRODUCT_COLUMNS, ProductListQuery, category_options},
};
use crate::routes::{AdminContext, Section};
use crate::state::AdminState;

const PRODUCTS_PATH: &str = "/admin/products";

// =============================================================================
// Templates
// =============================================================================

/// Products list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub ctx: AdminContext,
    pub filter: ProductFilter,
    pub page: botanical_core::Page<AdminProduct>,
    pub columns: [TableColumn<ProductSort>; 7],
    pub categories: Vec<FilterOption>,
}

/// Add or edit product template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub ctx: AdminContext,
    pub title: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub form: ProductForm,
    pub error: Option<String>,
    pub categories: [&'static str; 3],
}

impl ProductFormTemplate {
    fn new_product(ctx: AdminContext, form: ProductForm, error: Option<String>) -> Self {
        Self {
            ctx,
            title: "Add New Product",
            action: PRODUCTS_PATH.to_string(),
            submit_label: "Add Product",
            form,
            error,
            categories: PRODUCT_CATEGORIES,
        }
    }

    fn edit_product(
        ctx: AdminContext,
        id: ProductId,
        form: ProductForm,
        error: Option<String>,
    ) -> Self {
        Self {
            ctx,
            title: "Edit Product",
            action: format!("{PRODUCTS_PATH}/{id}"),
            submit_label: "Update Product",
            form,
            error,
            categories: PRODUCT_CATEGORIES,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Products table with search, category filter, sort, and pages.
#[instrument(skip(state, admin, list, query))]
pub async fn index(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Query(list): Query<ProductListQuery>,
    Query(query): Query<MessageQuery>,
) -> ProductsTemplate {
    let filter = ProductFilter::from(list);
    let products = state.read(|office| office.products().to_vec()).await;
    let categories = category_options(&products);
    let page = filter.apply(products);

    ProductsTemplate {
        ctx: AdminContext::new(admin, Section::Products, &query),
        filter,
        page,
        columns: PRODUCT_COLUMNS,
        categories,
    }
}

/// Blank add-product form.
#[instrument(skip(admin, query))]
pub async fn new(
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> ProductFormTemplate {
    ProductFormTemplate::new_product(
        AdminContext::new(admin, Section::Products, &query),
        ProductForm::blank(),
        None,
    )
}

/// Add a product.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(error) => {
            tracing::debug!(%error, "Product form rejected");
            let ctx = AdminContext::new(admin, Section::Products, &MessageQuery::default());
            let page = ProductFormTemplate::new_product(ctx, form, Some(error.to_string()));
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    let product = state
        .write(|office| office.add_product(draft, Utc::now()))
        .await;
    tracing::info!(product_id = %product.id, name = %product.name, "Product added");
    messages::success(PRODUCTS_PATH, "product_added").into_response()
}

/// Edit form for one product.
#[instrument(skip(state, admin, query))]
pub async fn edit(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Query(query): Query<MessageQuery>,
) -> Result<ProductFormTemplate> {
    let form = state
        .read(|office| office.product(id).map(ProductForm::from_product))
        .await?;
    Ok(ProductFormTemplate::edit_product(
        AdminContext::new(admin, Section::Products, &query),
        id,
        form,
        None,
    ))
}

/// Save an edited product.
#[instrument(skip(state, admin, form))]
pub async fn update(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(error) => {
            tracing::debug!(%error, "Product form rejected");
            let ctx = AdminContext::new(admin, Section::Products, &MessageQuery::default());
            let page = ProductFormTemplate::edit_product(ctx, id, form, Some(error.to_string()));
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    let updated = state
        .write(|office| office.update_product(id, draft, Utc::now()).map(|p| p.id))
        .await;
    match updated {
        Ok(_) => {
            tracing::info!(product_id = %id, "Product updated");
            messages::success(PRODUCTS_PATH, "product_updated").into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "Product update failed");
            messages::error(PRODUCTS_PATH, "product_not_found").into_response()
        }
    }
}

/// Delete a product.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Redirect {
    match state.write(|office| office.delete_product(id)).await {
        Ok(product) => {
            tracing::info!(product_id = %id, name = %product.name, "Product deleted");
            messages::success(PRODUCTS_PATH, "product_deleted")
        }
        Err(error) => {
            tracing::warn!(%error, "Product delete failed");
            messages::error(PRODUCTS_PATH, "product_not_found")
        }
    }
}
