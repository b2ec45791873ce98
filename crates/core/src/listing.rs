//! Helpers shared by the list views (store grid, admin managers, profile
//! orders, wishlist page).
//!
//! Each view keeps its own filters and sort keys; this module only provides
//! the pieces they all agree on: case-insensitive substring search, a sort
//! direction with the "click the same column to flip" rule, and page-slice
//! pagination.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A `Copy` argument to a template helper method.
///
/// Askama passes literals and paths by value, other expressions by
/// reference, and `{% for %}` loop variables (already references) by
/// reference again, so helpers accept all three shapes.
pub trait TemplateArg<T> {
    fn resolve(&self) -> T;
}

impl<T: Copy> TemplateArg<T> for T {
    fn resolve(&self) -> T {
        *self
    }
}

impl<T: Copy> TemplateArg<T> for &T {
    fn resolve(&self) -> T {
        **self
    }
}

impl<T: Copy> TemplateArg<T> for &&T {
    fn resolve(&self) -> T {
        ***self
    }
}

/// Case-insensitive substring match of `query` against any of `fields`.
///
/// A blank query matches everything.
///
/// ```
/// use botanical_core::matches_query;
///
/// assert!(matches_query("snake", &["Snake Plant", "Hardy"]));
/// assert!(matches_query("  ", &["anything"]));
/// assert!(!matches_query("fern", &["Snake Plant"]));
/// ```
#[must_use]
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Compare two display strings ignoring case, falling back to a byte
/// comparison so distinct strings never compare equal.
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort direction for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending comparison.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Arrow shown next to the active column header.
    #[must_use]
    pub const fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "\u{2191}",
            Self::Desc => "\u{2193}",
        }
    }

    /// Direction to use after a column header is clicked.
    ///
    /// Clicking the active column flips the direction; clicking any other
    /// column starts ascending.
    #[must_use]
    pub fn after_click<F: PartialEq>(self, active: &F, clicked: &F) -> Self {
        if active == clicked {
            self.toggled()
        } else {
            Self::Asc
        }
    }
}

/// One page of a filtered, sorted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown (after clamping).
    pub page: usize,
    pub per_page: usize,
    /// Number of items across all pages.
    pub total_items: usize,
    /// `ceil(total_items / per_page)`; zero for an empty list.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `items` into the requested page.
    ///
    /// `page` is 1-based and clamped into `1..=total_pages`; a `per_page` of
    /// zero is treated as one.
    #[must_use]
    pub fn paginate(items: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));
        let start = (page - 1) * per_page;

        let items = items.into_iter().skip(start).take(per_page).collect();

        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first item shown, or 0 when empty.
    #[must_use]
    pub fn first_shown(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item shown, or 0 when empty.
    #[must_use]
    pub fn last_shown(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_shown() + self.items.len() - 1
        }
    }

    /// Whether `page` is the page shown (pager highlighting).
    #[must_use]
    pub fn is_current(&self, page: impl TemplateArg<usize>) -> bool {
        page.resolve() == self.page
    }

    /// Every page number, for the pager.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }

    /// Map the items of this page, keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_query_any_field() {
        assert!(matches_query("ORD-2023", &["ORD-2023-001", "John Doe"]));
        assert!(matches_query("john@", &["ORD-2023-001", "John Doe", "john@example.com"]));
        assert!(!matches_query("zzz", &["ORD-2023-001", "John Doe"]));
    }

    #[test]
    fn test_compare_text_ignores_case() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Zebra", "apple"), Ordering::Greater);
        assert_ne!(compare_text("a", "A"), Ordering::Equal);
    }

    #[test]
    fn test_sort_direction_after_click() {
        let dir = SortDirection::Asc;
        assert_eq!(dir.after_click(&"name", &"name"), SortDirection::Desc);
        assert_eq!(
            SortDirection::Desc.after_click(&"name", &"name"),
            SortDirection::Asc
        );
        assert_eq!(
            SortDirection::Desc.after_click(&"name", &"price"),
            SortDirection::Asc
        );
    }

    #[test]
    fn test_apply_reverses_for_desc() {
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
    }

    #[test]
    fn test_paginate_slices_pages() {
        let page = Page::paginate((1..=12).collect::<Vec<_>>(), 3, 5);
        assert_eq!(page.items, vec![11, 12]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.first_shown(), 11);
        assert_eq!(page.last_shown(), 12);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for (n, per_page, expected) in [(0, 5, 0), (1, 5, 1), (5, 5, 1), (6, 5, 2), (27, 12, 3)] {
            let page = Page::paginate(vec![(); n], 1, per_page);
            assert_eq!(page.total_pages, expected, "n={n} per_page={per_page}");
        }
    }

    #[test]
    fn test_out_of_range_page_clamps() {
        let page = Page::paginate((1..=8).collect::<Vec<_>>(), 99, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![6, 7, 8]);

        let page = Page::paginate((1..=8).collect::<Vec<_>>(), 0, 5);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_list_has_page_one() {
        let page = Page::paginate(Vec::<i32>::new(), 4, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.first_shown(), 0);
        assert!(page.page_numbers().is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_zero_per_page_treated_as_one() {
        let page = Page::paginate(vec![1, 2, 3], 2, 0);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items, vec![2]);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::paginate(vec![1, 2, 3], 1, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_is_current_accepts_loop_references() {
        let page = Page::paginate(vec![1, 2, 3, 4], 2, 2);
        let numbers = page.page_numbers();
        let current: Vec<bool> = numbers.iter().map(|n| page.is_current(&n)).collect();
        assert_eq!(current, vec![false, true]);
        assert!(page.is_current(2usize));
        assert!(page.is_current(&2usize));
    }
}
