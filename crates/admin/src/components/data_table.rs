//! Data table component types.
//!
//! These types describe the sortable tables used by the products, orders,
//! and users managers: which columns exist, which of them sort, and which
//! options a filter dropdown offers.

use botanical_core::SortDirection;

/// A column that can order a table.
pub trait SortKey: Copy + PartialEq + 'static {
    /// Every sortable column.
    const ALL: &'static [Self];

    /// Query-string value.
    fn as_str(&self) -> &'static str;

    /// Direction a column starts in when it is clicked for the first time.
    fn initial_direction(&self) -> SortDirection {
        SortDirection::Asc
    }

    /// Parse a query-string value.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == value)
    }
}

/// Direction after clicking `clicked` while the table is sorted by `active`.
///
/// Clicking the active column flips the direction; any other column starts
/// in its initial direction.
#[must_use]
pub fn next_direction<S: SortKey>(active: S, dir: SortDirection, clicked: S) -> SortDirection {
    if active == clicked {
        dir.toggled()
    } else {
        clicked.initial_direction()
    }
}

/// Direction from a query value, or `None` when absent or unrecognized.
#[must_use]
pub fn parse_direction(value: &str) -> Option<SortDirection> {
    match value.trim() {
        "asc" => Some(SortDirection::Asc),
        "desc" => Some(SortDirection::Desc),
        _ => None,
    }
}

/// Column definition for a data table.
#[derive(Debug, Clone, Copy)]
pub struct TableColumn<S> {
    /// Display label for the column header.
    pub label: &'static str,
    /// Sort key, for sortable columns.
    pub sort: Option<S>,
}

impl<S> TableColumn<S> {
    /// Create a new sortable column.
    #[must_use]
    pub const fn sortable(label: &'static str, sort: S) -> Self {
        Self {
            label,
            sort: Some(sort),
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub const fn new(label: &'static str) -> Self {
        Self { label, sort: None }
    }
}

/// Option for select filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// The leading "All" option of every select filter.
    #[must_use]
    pub fn all() -> Self {
        Self::new("all", "All")
    }
}

/// Whether a select filter value means "no filter".
#[must_use]
pub fn is_all(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("all")
}

/// Build `path?query` from key/value pairs, dropping empty values.
#[must_use]
pub fn href(path: &str, pairs: &[(&str, String)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs.iter().filter(|(_, v)| !v.is_empty()) {
        query.append_pair(key, value);
    }
    let query = query.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Column {
        Name,
        Date,
    }

    impl SortKey for Column {
        const ALL: &'static [Self] = &[Self::Name, Self::Date];

        fn as_str(&self) -> &'static str {
            match self {
                Self::Name => "name",
                Self::Date => "date",
            }
        }

        fn initial_direction(&self) -> SortDirection {
            match self {
                Self::Name => SortDirection::Asc,
                Self::Date => SortDirection::Desc,
            }
        }
    }

    #[test]
    fn test_next_direction() {
        assert_eq!(
            next_direction(Column::Name, SortDirection::Asc, Column::Name),
            SortDirection::Desc
        );
        assert_eq!(
            next_direction(Column::Name, SortDirection::Desc, Column::Date),
            SortDirection::Desc
        );
        assert_eq!(
            next_direction(Column::Date, SortDirection::Desc, Column::Name),
            SortDirection::Asc
        );
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!(Column::parse("date"), Some(Column::Date));
        assert_eq!(Column::parse("DATE"), None);
    }

    #[test]
    fn test_href_skips_empty_values() {
        assert_eq!(href("/admin/users", &[("q", String::new())]), "/admin/users");
        assert_eq!(
            href(
                "/admin/users",
                &[("q", "jane doe".to_string()), ("page", "2".to_string())]
            ),
            "/admin/users?q=jane+doe&page=2"
        );
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("desc"), Some(SortDirection::Desc));
        assert_eq!(parse_direction(" asc "), Some(SortDirection::Asc));
        assert_eq!(parse_direction("down"), None);
    }

    #[test]
    fn test_is_all() {
        assert!(is_all(""));
        assert!(is_all("All"));
        assert!(!is_all("admin"));
    }
}
