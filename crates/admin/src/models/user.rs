//! Users manager: accounts, list filter, edit form, and mock accounts.

use std::cmp::Ordering;
use std::str::FromStr;

use botanical_core::{
    AccountRole, AccountStatus, Email, Page, SortDirection, TemplateArg, UserId,
    listing::compare_text, matches_query,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::components::data_table::{
    self, FilterOption, SortKey, TableColumn, next_direction, parse_direction,
};
use crate::models::{parse_page, parse_per_page, utc};

/// Page sizes offered by the users manager.
pub const USER_PAGE_SIZES: [usize; 3] = [5, 10, 25];

/// Default page size of the users manager.
pub const DEFAULT_USERS_PER_PAGE: usize = 5;

/// An account listed in the users manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    /// Number of orders placed.
    pub orders: u32,
    pub status: AccountStatus,
}

impl AdminUser {
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }

    /// Last login date, or "Never".
    #[must_use]
    pub fn last_login_label(&self) -> String {
        self.last_login
            .map_or_else(|| "Never".to_string(), |at| at.format("%b %-d, %Y").to_string())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    fn matches(&self, query: &str) -> bool {
        matches_query(query, &[&self.name, &self.email])
    }
}

/// Sortable columns of the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSort {
    #[default]
    Name,
    Email,
    Role,
    Orders,
    Created,
    LastLogin,
    Status,
}

impl SortKey for UserSort {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Email,
        Self::Role,
        Self::Orders,
        Self::Created,
        Self::LastLogin,
        Self::Status,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Orders => "orders",
            Self::Created => "created",
            Self::LastLogin => "last_login",
            Self::Status => "status",
        }
    }
}

impl UserSort {
    fn compare(self, a: &AdminUser, b: &AdminUser) -> Ordering {
        match self {
            Self::Name => compare_text(&a.name, &b.name),
            Self::Email => compare_text(&a.email, &b.email),
            Self::Role => a.role.as_str().cmp(b.role.as_str()),
            Self::Orders => a.orders.cmp(&b.orders),
            Self::Created => a.created_at.cmp(&b.created_at),
            Self::LastLogin => a.last_login.cmp(&b.last_login),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

/// Columns of the users table.
pub const USER_COLUMNS: [TableColumn<UserSort>; 8] = [
    TableColumn::sortable("User", UserSort::Name),
    TableColumn::sortable("Email", UserSort::Email),
    TableColumn::sortable("Role", UserSort::Role),
    TableColumn::sortable("Orders", UserSort::Orders),
    TableColumn::sortable("Joined", UserSort::Created),
    TableColumn::sortable("Last Login", UserSort::LastLogin),
    TableColumn::sortable("Status", UserSort::Status),
    TableColumn::new("Actions"),
];

/// Raw query string of the users manager.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserListQuery {
    pub q: String,
    pub role: String,
    pub status: String,
    pub sort: String,
    pub dir: String,
    pub page: String,
    pub per_page: String,
}

/// Search, role and status filters, sort, and paging of the users manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    pub q: String,
    pub role: Option<AccountRole>,
    pub status: Option<AccountStatus>,
    pub sort: UserSort,
    pub dir: SortDirection,
    pub page: usize,
    pub per_page: usize,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            q: String::new(),
            role: None,
            status: None,
            sort: UserSort::Name,
            dir: SortDirection::Asc,
            page: 1,
            per_page: DEFAULT_USERS_PER_PAGE,
        }
    }
}

fn parse_select<T: FromStr>(value: &str) -> Option<T> {
    if data_table::is_all(value) {
        None
    } else {
        T::from_str(value).ok()
    }
}

impl From<UserListQuery> for UserFilter {
    fn from(query: UserListQuery) -> Self {
        Self {
            q: query.q.trim().to_string(),
            role: parse_select(&query.role),
            status: parse_select(&query.status),
            sort: UserSort::parse(&query.sort).unwrap_or_default(),
            dir: parse_direction(&query.dir).unwrap_or_default(),
            page: parse_page(&query.page),
            per_page: parse_per_page(&query.per_page, &USER_PAGE_SIZES, DEFAULT_USERS_PER_PAGE),
        }
    }
}

impl UserFilter {
    fn sort(&self, users: &mut Vec<AdminUser>) {
        if self.sort != UserSort::LastLogin {
            users.sort_by(|a, b| self.dir.apply(self.sort.compare(a, b)));
            return;
        }

        // Accounts that never logged in keep their slots; only the others
        // are ordered among themselves.
        let slots: Vec<usize> = users
            .iter()
            .enumerate()
            .filter(|(_, user)| user.last_login.is_some())
            .map(|(i, _)| i)
            .collect();
        let mut logged_in: Vec<AdminUser> = slots
            .iter()
            .filter_map(|&i| users.get(i).cloned())
            .collect();
        logged_in.sort_by(|a, b| self.dir.apply(a.last_login.cmp(&b.last_login)));
        for (slot, user) in slots.into_iter().zip(logged_in) {
            if let Some(target) = users.get_mut(slot) {
                *target = user;
            }
        }
    }

    /// Filter, sort, and paginate.
    #[must_use]
    pub fn apply(&self, users: Vec<AdminUser>) -> Page<AdminUser> {
        let mut users: Vec<_> = users
            .into_iter()
            .filter(|user| user.matches(&self.q))
            .filter(|user| self.role.is_none_or(|r| user.role == r))
            .filter(|user| self.status.is_none_or(|s| user.status == s))
            .collect();
        self.sort(&mut users);
        Page::paginate(users, self.page, self.per_page)
    }

    fn href(&self, page: usize, sort: UserSort, dir: SortDirection) -> String {
        let default = Self::default();
        let (sort, dir) = if sort == default.sort && dir == default.dir {
            (String::new(), String::new())
        } else {
            (sort.as_str().to_string(), dir.as_str().to_string())
        };
        data_table::href(
            "/admin/users",
            &[
                ("q", self.q.clone()),
                (
                    "role",
                    self.role.map(|r| r.as_str().to_string()).unwrap_or_default(),
                ),
                (
                    "status",
                    self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
                ),
                ("sort", sort),
                ("dir", dir),
                (
                    "per_page",
                    if self.per_page == default.per_page {
                        String::new()
                    } else {
                        self.per_page.to_string()
                    },
                ),
                ("page", if page > 1 { page.to_string() } else { String::new() }),
            ],
        )
    }

    #[must_use]
    pub fn current_href(&self) -> String {
        self.href(self.page, self.sort, self.dir)
    }

    #[must_use]
    pub fn page_href(&self, page: impl TemplateArg<usize>) -> String {
        self.href(page.resolve(), self.sort, self.dir)
    }

    #[must_use]
    pub fn sort_href(&self, sort: impl TemplateArg<UserSort>) -> String {
        let sort = sort.resolve();
        self.href(1, sort, next_direction(self.sort, self.dir, sort))
    }

    #[must_use]
    pub fn arrow(&self, sort: impl TemplateArg<UserSort>) -> &'static str {
        if self.sort == sort.resolve() {
            self.dir.arrow()
        } else {
            ""
        }
    }

    #[must_use]
    pub fn is_role(&self, value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        self.role
            .map_or_else(|| data_table::is_all(value), |r| r.as_str() == value)
    }

    #[must_use]
    pub fn is_status(&self, value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        self.status
            .map_or_else(|| data_table::is_all(value), |s| s.as_str() == value)
    }

    #[must_use]
    pub fn is_per_page(&self, size: impl TemplateArg<usize>) -> bool {
        self.per_page == size.resolve()
    }
}

/// "All" plus every account role.
#[must_use]
pub fn role_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption::all())
        .chain(
            AccountRole::ALL
                .iter()
                .map(|r| FilterOption::new(r.as_str(), r.label())),
        )
        .collect()
}

/// "All" plus every account status.
#[must_use]
pub fn status_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption::all())
        .chain(
            AccountStatus::ALL
                .iter()
                .map(|s| FilterOption::new(s.as_str(), s.label())),
        )
        .collect()
}

/// Submitted user edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

/// Validated user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: String,
    pub email: Email,
    pub role: AccountRole,
    pub status: AccountStatus,
}

/// Why a user form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserFormError {
    #[error("Name is required")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please choose a role")]
    InvalidRole,
    #[error("Please choose a status")]
    InvalidStatus,
}

impl UserForm {
    #[must_use]
    pub fn from_user(user: &AdminUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            status: user.status.as_str().to_string(),
        }
    }

    #[must_use]
    pub fn is_role(&self, role: impl TemplateArg<AccountRole>) -> bool {
        self.role == role.resolve().as_str()
    }

    #[must_use]
    pub fn is_status(&self, status: impl TemplateArg<AccountStatus>) -> bool {
        self.status == status.resolve().as_str()
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails.
    pub fn validate(&self) -> Result<UserUpdate, UserFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UserFormError::MissingName);
        }
        let email = Email::parse(&self.email).map_err(|_| UserFormError::InvalidEmail)?;
        let role = AccountRole::from_str(&self.role).map_err(|_| UserFormError::InvalidRole)?;
        let status =
            AccountStatus::from_str(&self.status).map_err(|_| UserFormError::InvalidStatus)?;
        Ok(UserUpdate {
            name: name.to_string(),
            email,
            role,
            status,
        })
    }
}

fn user(
    id: i32,
    name: &str,
    email: &str,
    role: AccountRole,
    (created_at, last_login): (&str, &str),
    orders: u32,
    status: AccountStatus,
) -> AdminUser {
    AdminUser {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
        created_at: utc(created_at),
        last_login: Some(utc(last_login)),
        orders,
        status,
    }
}

/// Accounts the back office starts with.
pub(crate) fn seed_users() -> Vec<AdminUser> {
    use AccountRole::{Admin, Customer};
    use AccountStatus::{Active, Inactive};

    vec![
        user(1, "John Doe", "john@example.com", Customer, ("2023-08-15T10:15:00Z", "2023-10-25T14:30:00Z"), 5, Active),
        user(2, "Admin User", "admin@example.com", Admin, ("2023-05-10T09:20:00Z", "2023-10-28T09:45:00Z"), 0, Active),
        user(3, "Jane Smith", "jane@example.com", Customer, ("2023-09-05T11:30:00Z", "2023-10-20T16:15:00Z"), 2, Active),
        user(4, "Robert Johnson", "robert@example.com", Customer, ("2023-07-22T13:45:00Z", "2023-10-15T10:30:00Z"), 8, Active),
        user(5, "Emily Davis", "emily@example.com", Customer, ("2023-08-30T15:20:00Z", "2023-10-26T11:20:00Z"), 3, Inactive),
        user(6, "Michael Wilson", "michael@example.com", Customer, ("2023-06-18T08:15:00Z", "2023-09-15T14:10:00Z"), 1, Inactive),
        user(7, "Sarah Brown", "sarah@example.com", Customer, ("2023-09-12T10:40:00Z", "2023-10-27T13:25:00Z"), 4, Active),
        user(8, "James Miller", "james@example.com", Customer, ("2023-07-05T09:30:00Z", "2023-10-18T15:40:00Z"), 6, Active),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(page: &Page<AdminUser>) -> Vec<&str> {
        page.items.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn test_default_is_name_ascending_five_per_page() {
        let page = UserFilter::default().apply(seed_users());
        assert_eq!(page.total_pages, 2);
        assert_eq!(
            names(&page),
            ["Admin User", "Emily Davis", "James Miller", "Jane Smith", "John Doe"]
        );
    }

    #[test]
    fn test_role_and_status_filters_combine() {
        let filter = UserFilter::from(UserListQuery {
            role: "customer".to_string(),
            status: "inactive".to_string(),
            ..UserListQuery::default()
        });
        let page = filter.apply(seed_users());
        assert_eq!(names(&page), ["Emily Davis", "Michael Wilson"]);
    }

    #[test]
    fn test_search_matches_email() {
        let filter = UserFilter {
            q: "SARAH@".to_string(),
            ..UserFilter::default()
        };
        assert_eq!(names(&filter.apply(seed_users())), ["Sarah Brown"]);
    }

    #[test]
    fn test_orders_descending() {
        let filter = UserFilter {
            sort: UserSort::Orders,
            dir: SortDirection::Desc,
            ..UserFilter::default()
        };
        let page = filter.apply(seed_users());
        assert_eq!(names(&page).first(), Some(&"Robert Johnson"));
    }

    #[test]
    fn test_last_login_leaves_never_logged_in_in_place() {
        let mut users = seed_users();
        users.truncate(3);
        if let Some(admin) = users.get_mut(1) {
            admin.last_login = None;
        }
        let filter = UserFilter {
            sort: UserSort::LastLogin,
            dir: SortDirection::Asc,
            ..UserFilter::default()
        };
        let page = filter.apply(users);
        // Jane (Oct 20) before John (Oct 25); Admin keeps the middle slot.
        assert_eq!(names(&page), ["Jane Smith", "Admin User", "John Doe"]);
        assert_eq!(page.items.get(1).unwrap().last_login_label(), "Never");
    }

    #[test]
    fn test_new_column_starts_ascending() {
        let filter = UserFilter::default();
        assert_eq!(filter.sort_href(UserSort::Email), "/admin/users?sort=email&dir=asc");
        assert_eq!(filter.sort_href(UserSort::Name), "/admin/users?sort=name&dir=desc");
    }

    #[test]
    fn test_form_validation() {
        let mut form = UserForm::from_user(seed_users().first().unwrap());
        assert!(form.validate().is_ok());

        form.email = "not-an-email".to_string();
        assert_eq!(form.validate(), Err(UserFormError::InvalidEmail));

        form.email = "john@example.com".to_string();
        form.role = "owner".to_string();
        assert_eq!(form.validate(), Err(UserFormError::InvalidRole));
    }
}
