//! Single-column sort state and the missing-last comparator.

use std::cmp::Ordering;
use std::fmt;

use crate::model::Cell;
use crate::model::TableRow;

/// Sort order of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending (A-Z, 0-9).
    Asc,
    /// Descending (Z-A, 9-0).
    Desc,
    /// Not sorted.
    #[default]
    Unsorted,
}

impl SortOrder {
    /// Returns `asc`, `desc` or `none`.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
            SortOrder::Unsorted => "none",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active sort of a table: at most one column.
///
/// # Example
///
/// ```
/// use quantix_lib::table::{SortOrder, SortSpec};
///
/// let mut sort = SortSpec::unsorted();
/// sort.toggle("size");
/// assert_eq!(sort.order_for(&"size"), SortOrder::Asc);
/// sort.toggle("size");
/// assert_eq!(sort.order_for(&"size"), SortOrder::Desc);
/// sort.toggle("volume");
/// assert_eq!(sort.order_for(&"size"), SortOrder::Unsorted);
/// assert_eq!(sort.order_for(&"volume"), SortOrder::Asc);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec<C> {
    column: Option<C>,
    order: SortOrder,
}

impl<C: PartialEq> SortSpec<C> {
    /// No active sort.
    pub fn unsorted() -> Self {
        Self {
            column: None,
            order: SortOrder::Unsorted,
        }
    }

    /// Ascending sort on a column.
    pub fn asc(column: C) -> Self {
        Self {
            column: Some(column),
            order: SortOrder::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(column: C) -> Self {
        Self {
            column: Some(column),
            order: SortOrder::Desc,
        }
    }

    /// Returns the sorted column, if any.
    pub fn column(&self) -> Option<&C> {
        self.column.as_ref()
    }

    /// Returns the sort order.
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Returns `true` when rows need sorting.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.order != SortOrder::Unsorted
    }

    /// Handles a click on a column header.
    ///
    /// The column sorted ascending flips to descending. Anything else,
    /// including the column sorted descending, becomes ascending.
    pub fn toggle(&mut self, column: C) {
        let order = if self.column.as_ref() == Some(&column) && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.column = Some(column);
        self.order = order;
    }

    /// Header indicator for `column`.
    pub fn order_for(&self, column: &C) -> SortOrder {
        match &self.column {
            Some(active) if active == column => self.order,
            _ => SortOrder::Unsorted,
        }
    }

    /// Drops the active sort.
    pub fn clear(&mut self) {
        self.column = None;
        self.order = SortOrder::Unsorted;
    }
}

impl<C: PartialEq> Default for SortSpec<C> {
    fn default() -> Self {
        Self::unsorted()
    }
}

/// Compares two cells of the sort column.
///
/// Missing values (see [`Cell::is_missing`]) go last in either order, and two
/// missing values compare equal. Present values compare naturally and the
/// result is reversed for [`SortOrder::Desc`].
pub fn compare_cells(a: &Cell<'_>, b: &Cell<'_>, order: SortOrder) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match order {
            SortOrder::Desc => a.natural_cmp(b).reverse(),
            SortOrder::Asc | SortOrder::Unsorted => a.natural_cmp(b),
        },
    }
}

/// Stable-sorts rows by the sort column.
///
/// Leaves `rows` untouched when the sort is inactive or there is nothing to
/// sort.
pub fn sort_rows<R: TableRow>(rows: &mut [R], sort: &SortSpec<R::Column>) {
    let Some(column) = sort.column() else {
        return;
    };
    if sort.order() == SortOrder::Unsorted || rows.is_empty() {
        return;
    }
    let order = sort.order();
    rows.sort_by(|a, b| compare_cells(&a.cell(column), &b.cell(column), order));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        id: u32,
        v: Option<f64>,
    }

    impl TableRow for Row {
        type Column = &'static str;

        fn cell(&self, _column: &&'static str) -> Cell<'_> {
            self.v.into()
        }
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut rows = vec![
            Row { id: 1, v: Some(5.0) },
            Row { id: 2, v: Some(5.0) },
            Row { id: 3, v: Some(3.0) },
        ];
        sort_rows(&mut rows, &SortSpec::desc("v"));
        assert_eq!(ids(&rows), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_sinks_in_both_orders() {
        let mut rows = vec![
            Row { id: 1, v: None },
            Row { id: 2, v: Some(5.0) },
            Row { id: 3, v: Some(2.0) },
        ];
        sort_rows(&mut rows, &SortSpec::asc("v"));
        assert_eq!(ids(&rows), vec![3, 2, 1]);

        sort_rows(&mut rows, &SortSpec::desc("v"));
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_zero_counts_as_missing() {
        let mut rows = vec![
            Row { id: 1, v: Some(0.0) },
            Row { id: 2, v: Some(-1.0) },
        ];
        sort_rows(&mut rows, &SortSpec::asc("v"));
        assert_eq!(ids(&rows), vec![2, 1]);
    }

    #[test]
    fn test_unsorted_leaves_rows_alone() {
        let mut rows = vec![Row { id: 2, v: Some(1.0) }, Row { id: 1, v: Some(9.0) }];
        sort_rows(&mut rows, &SortSpec::unsorted());
        assert_eq!(ids(&rows), vec![2, 1]);
    }

    #[test]
    fn test_toggle_from_desc_goes_back_to_asc() {
        let mut sort = SortSpec::desc("size");
        sort.toggle("size");
        assert_eq!(sort.order(), SortOrder::Asc);
    }
}
