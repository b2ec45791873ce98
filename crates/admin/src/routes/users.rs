//! Users manager route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use botanical_core::{AccountRole, AccountStatus, Page, UserId};
use tracing::instrument;

use crate::components::data_table::{FilterOption, SortKey, TableColumn};
use crate::error::Result;
use crate::filters;
use crate::messages::{self, MessageQuery};
use crate::middleware::RequireAdmin;
use crate::models::{
    AdminUser, UserFilter, UserForm, UserSort,
    user::{USER_COLUMNS, USER_PAGE_SIZES, UserListQuery, role_options, status_options},
};
use crate::routes::{AdminContext, Section};
use crate::state::AdminState;

const USERS_PATH: &str = "/admin/users";

/// Users list template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub ctx: AdminContext,
    pub filter: UserFilter,
    pub page: Page<AdminUser>,
    pub columns: [TableColumn<UserSort>; 8],
    pub role_options: Vec<FilterOption>,
    pub status_options: Vec<FilterOption>,
    pub page_sizes: [usize; 3],
}

/// User edit template.
#[derive(Template, WebTemplate)]
#[template(path = "users/edit.html")]
pub struct UserEditTemplate {
    pub ctx: AdminContext,
    pub id: UserId,
    pub form: UserForm,
    pub error: Option<String>,
    pub roles: &'static [AccountRole],
    pub statuses: &'static [AccountStatus],
}

impl UserEditTemplate {
    fn new(ctx: AdminContext, id: UserId, form: UserForm, error: Option<String>) -> Self {
        Self {
            ctx,
            id,
            form,
            error,
            roles: AccountRole::ALL,
            statuses: AccountStatus::ALL,
        }
    }
}

/// Users table with search, role and status filters, sort, and page size.
#[instrument(skip(state, admin, list, query))]
pub async fn index(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Query(list): Query<UserListQuery>,
    Query(query): Query<MessageQuery>,
) -> UsersTemplate {
    let filter = UserFilter::from(list);
    let users = state.read(|office| office.users().to_vec()).await;
    let page = filter.apply(users);

    UsersTemplate {
        ctx: AdminContext::new(admin, Section::Users, &query),
        filter,
        page,
        columns: USER_COLUMNS,
        role_options: role_options(),
        status_options: status_options(),
        page_sizes: USER_PAGE_SIZES,
    }
}

/// Edit form for one user.
#[instrument(skip(state, admin, query))]
pub async fn edit(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
    Query(query): Query<MessageQuery>,
) -> Result<UserEditTemplate> {
    let form = state
        .read(|office| office.user(id).map(UserForm::from_user))
        .await?;
    Ok(UserEditTemplate::new(
        AdminContext::new(admin, Section::Users, &query),
        id,
        form,
        None,
    ))
}

/// Save an edited user.
#[instrument(skip(state, admin, form))]
pub async fn update(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
    Form(form): Form<UserForm>,
) -> Response {
    let update = match form.validate() {
        Ok(update) => update,
        Err(error) => {
            tracing::debug!(%error, "User form rejected");
            let ctx = AdminContext::new(admin, Section::Users, &MessageQuery::default());
            let page = UserEditTemplate::new(ctx, id, form, Some(error.to_string()));
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    let updated = state
        .write(|office| office.update_user(id, update).map(|u| u.name.clone()))
        .await;
    match updated {
        Ok(name) => {
            tracing::info!(user_id = %id, "User updated");
            messages::success_item(USERS_PATH, "user_updated", &name).into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "User update failed");
            messages::error(USERS_PATH, "user_not_found").into_response()
        }
    }
}

/// Delete a user.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Redirect {
    match state.write(|office| office.delete_user(id)).await {
        Ok(user) => {
            tracing::info!(user_id = %id, "User deleted");
            messages::success_item(USERS_PATH, "user_deleted", &user.name)
        }
        Err(error) => {
            tracing::warn!(%error, "User delete failed");
            messages::error(USERS_PATH, "user_not_found")
        }
    }
}
