//! The stateful filter → sort → paginate pipeline behind every list view.

use std::ops::Range;

use super::ColumnSpec;
use super::Filter;
use super::FilterSet;
use super::PageItem;
use super::PageWindow;
use super::SortSpec;
use super::TableConfig;
use super::compare_cells;
use crate::model::TableRow;

/// Heading shown when active filters leave no rows.
pub const NO_RESULTS: &str = "No results";

/// Hint shown under [`NO_RESULTS`].
pub const QUERY_TOO_NARROW: &str = "Your query is too narrow";

/// What an empty or non-empty table should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState<'a> {
    /// There are rows on the current page.
    Rows,
    /// Active filters removed every row.
    NoResults,
    /// The dataset itself is empty. Carries the table's empty message.
    NothingYet(&'a str),
}

impl TableState<'_> {
    /// Returns the text to show for an empty table.
    pub fn message(&self) -> Option<String> {
        match self {
            TableState::Rows => None,
            TableState::NoResults => Some(format!("{}\n{}", NO_RESULTS, QUERY_TOO_NARROW)),
            TableState::NothingYet(message) => Some(message.to_string()),
        }
    }
}

/// One rendered frame of a table.
#[derive(Debug)]
pub struct TableView<'a, R: TableRow> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a R>,
    /// Displayed columns.
    pub columns: &'a [ColumnSpec<R::Column>],
    /// Current 1-based page.
    pub current_page: usize,
    /// Number of pages.
    pub total_pages: usize,
    /// Rows left after filtering.
    pub total_rows: usize,
    /// Index range of the current page in the sorted rows.
    pub range: Range<usize>,
    /// Pager buttons; empty when everything fits on one page.
    pub pages: Vec<PageItem>,
    /// Whether there are rows, or which empty state to show.
    pub state: TableState<'a>,
    /// Active sort, for header arrows.
    pub sort: &'a SortSpec<R::Column>,
    /// Show the usage hint line.
    pub hints: bool,
    /// Prefix each row with its 1-based position.
    pub indexed: bool,
}

impl<R: TableRow> TableView<'_, R> {
    /// `Displaying results 11-20 of 45`, or `None` for an empty table.
    pub fn summary(&self) -> Option<String> {
        if self.total_rows == 0 {
            return None;
        }
        Some(format!(
            "Displaying results {}-{} of {}",
            self.range.start + 1,
            self.range.end,
            self.total_rows
        ))
    }

    /// Returns `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.state != TableState::Rows
    }
}

/// Owns a table's rows and the user's filters, sort and page.
///
/// The filtered and sorted row order is recomputed on every change to rows,
/// filters or sort, and the page is pulled back into range whenever the
/// filtered count changes, so [`view`](TableEngine::view) never points past
/// the end.
///
/// # Example
///
/// ```
/// use quantix_lib::model::Record;
/// use quantix_lib::table::{ColumnSpec, Filter, TableConfig, TableEngine};
///
/// let rows: Vec<Record> = (1..=23)
///     .map(|i| Record::new().set("v", i as i64))
///     .collect();
/// let config = TableConfig::new(vec![ColumnSpec::new("v".to_string(), "V")])
///     .with_rows_per_page(10);
/// let mut table = TableEngine::new(rows, config);
///
/// table.go_to(3);
/// assert_eq!(table.view().rows.len(), 3);
///
/// table.insert_filter(Filter::new("small", |r: &Record| {
///     r.get_int("v").ok().flatten().is_some_and(|v| v <= 12)
/// }));
/// assert_eq!(table.view().current_page, 2);
/// ```
pub struct TableEngine<R: TableRow> {
    rows: Vec<R>,
    config: TableConfig<R::Column>,
    filters: FilterSet<R>,
    sort: SortSpec<R::Column>,
    window: PageWindow,
    /// Indices into `rows` that pass the filters, in sorted order.
    order: Vec<usize>,
}

impl<R: TableRow> TableEngine<R> {
    /// Creates an engine sorted descending on the configured default column.
    pub fn new(rows: Vec<R>, config: TableConfig<R::Column>) -> Self {
        let sort = match &config.default_sort {
            Some(column) => SortSpec::desc(column.clone()),
            None => SortSpec::unsorted(),
        };
        let window = PageWindow::new(config.rows_per_page);
        let mut engine = Self {
            rows,
            config,
            filters: FilterSet::new(),
            sort,
            window,
            order: Vec::new(),
        };
        engine.refresh();
        engine
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Replaces the rows, as after a refetch.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.refresh();
    }

    /// Returns all rows in their original order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Returns the number of rows passing the filters.
    pub fn filtered_len(&self) -> usize {
        self.order.len()
    }

    /// Iterates over the filtered rows in sorted order.
    pub fn sorted_rows(&self) -> impl Iterator<Item = &R> {
        self.order.iter().map(|&index| &self.rows[index])
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Returns the active filters.
    pub fn filters(&self) -> &FilterSet<R> {
        &self.filters
    }

    /// Adds a filter, replacing one with the same id.
    pub fn insert_filter(&mut self, filter: Filter<R>) {
        self.filters.insert(filter);
        self.refresh();
    }

    /// Removes a filter without running its hook.
    pub fn remove_filter(&mut self, id: &str) -> Option<Filter<R>> {
        let removed = self.filters.remove(id);
        if removed.is_some() {
            self.refresh();
        }
        removed
    }

    /// Removes a filter and runs its hook.
    pub fn dismiss_filter(&mut self, id: &str) -> bool {
        let dismissed = self.filters.dismiss(id);
        if dismissed {
            self.refresh();
        }
        dismissed
    }

    /// Replaces every filter at once.
    pub fn set_filters(&mut self, filters: FilterSet<R>) {
        self.filters = filters;
        self.refresh();
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh();
    }

    // =========================================================================
    // Sort
    // =========================================================================

    /// Returns the active sort.
    pub fn sort(&self) -> &SortSpec<R::Column> {
        &self.sort
    }

    /// Handles a header click on `column`.
    pub fn toggle_sort(&mut self, column: R::Column) {
        self.sort.toggle(column);
        self.resort();
    }

    /// Replaces the active sort.
    pub fn set_sort(&mut self, sort: SortSpec<R::Column>) {
        self.sort = sort;
        self.resort();
    }

    // =========================================================================
    // Pages
    // =========================================================================

    /// Returns the page window.
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    /// Returns the current 1-based page.
    pub fn current_page(&self) -> usize {
        self.window.page()
    }

    /// Returns the number of pages.
    pub fn total_pages(&self) -> usize {
        self.window.total_pages(self.order.len())
    }

    /// Jumps to a page, clamped into range.
    pub fn go_to(&mut self, page: usize) {
        self.window.go_to(page, self.order.len());
    }

    /// Jumps to a typed page number; ignores non-numbers.
    pub fn go_to_input(&mut self, input: &str) -> bool {
        self.window.go_to_input(input, self.order.len())
    }

    /// Moves to the next page, if any.
    pub fn next_page(&mut self) {
        self.window.next(self.order.len());
    }

    /// Moves to the previous page, if any.
    pub fn prev_page(&mut self) {
        self.window.prev();
    }

    /// Changes the page size.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.config.rows_per_page = rows_per_page;
        self.window.set_rows_per_page(rows_per_page, self.order.len());
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Returns the configuration.
    pub fn config(&self) -> &TableConfig<R::Column> {
        &self.config
    }

    /// Produces the current frame.
    pub fn view(&self) -> TableView<'_, R> {
        let total_rows = self.order.len();
        let range = self.window.range(total_rows);
        let rows = self.order[range.clone()]
            .iter()
            .map(|&index| &self.rows[index])
            .collect();

        let state = if total_rows > 0 {
            TableState::Rows
        } else if self.filters.is_empty() {
            TableState::NothingYet(&self.config.empty_message)
        } else {
            TableState::NoResults
        };

        let total_pages = self.total_pages();
        let pages = if total_pages > 1 {
            self.window.items(total_rows)
        } else {
            Vec::new()
        };

        TableView {
            rows,
            columns: &self.config.columns,
            current_page: self.window.page(),
            total_pages,
            total_rows,
            range,
            pages,
            state,
            sort: &self.sort,
            hints: self.config.hints,
            indexed: self.config.indexed,
        }
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    fn refresh(&mut self) {
        let previous = self.order.len();
        self.order = if self.filters.is_empty() {
            (0..self.rows.len()).collect()
        } else {
            (0..self.rows.len())
                .filter(|&index| self.filters.fits(&self.rows[index]))
                .collect()
        };
        if self.order.len() != previous {
            log::debug!(
                "Filtered rows changed from {} to {}",
                previous,
                self.order.len()
            );
        }
        self.resort();
        self.window.clamp(self.order.len());
    }

    fn resort(&mut self) {
        // Indices ascend in input order, so this restores the filtered order
        // and ties under the new sort keep it.
        self.order.sort_unstable();
        let Some(column) = self.sort.column() else {
            return;
        };
        if !self.sort.is_active() || self.order.is_empty() {
            return;
        }
        let order = self.sort.order();
        let rows = &self.rows;
        self.order.sort_by(|&a, &b| {
            compare_cells(&rows[a].cell(column), &rows[b].cell(column), order)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::table::SortOrder;

    fn numbered(n: i64) -> Vec<Record> {
        (1..=n).map(|i| Record::with_id(i.to_string()).set("v", i)).collect()
    }

    fn config(rows_per_page: usize) -> TableConfig<String> {
        TableConfig::new(vec![ColumnSpec::new("v".to_string(), "V")])
            .with_rows_per_page(rows_per_page)
            .with_empty_message("Nothing here yet")
    }

    fn ids(view: &TableView<'_, Record>) -> Vec<String> {
        view.rows
            .iter()
            .filter_map(|r| r.id().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_default_sort_starts_descending() {
        let table = TableEngine::new(numbered(3), config(10).with_default_sort("v".to_string()));
        assert_eq!(table.sort().order(), SortOrder::Desc);
        assert_eq!(ids(&table.view()), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_toggle_resorts_without_refiltering() {
        let mut table = TableEngine::new(numbered(3), config(10));
        assert_eq!(ids(&table.view()), vec!["1", "2", "3"]);

        table.toggle_sort("v".to_string());
        table.toggle_sort("v".to_string());
        assert_eq!(ids(&table.view()), vec!["3", "2", "1"]);
    }

    fn two_columns() -> Vec<Record> {
        vec![
            Record::with_id("a").set("v", 5i64).set("w", 1i64),
            Record::with_id("b").set("v", 3i64).set("w", 3i64),
            Record::with_id("c").set("v", 3i64).set("w", 2i64),
        ]
    }

    #[test]
    fn test_switching_sort_column_keeps_ties_in_input_order() {
        let mut table = TableEngine::new(two_columns(), config(10));
        table.set_sort(SortSpec::asc("w".to_string()));
        assert_eq!(ids(&table.view()), vec!["a", "c", "b"]);

        table.set_sort(SortSpec::desc("v".to_string()));
        assert_eq!(ids(&table.view()), vec!["a", "b", "c"]);

        table.toggle_sort("w".to_string());
        table.toggle_sort("v".to_string());
        assert_eq!(ids(&table.view()), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_clearing_sort_restores_input_order() {
        let mut table = TableEngine::new(two_columns(), config(10));
        table.set_sort(SortSpec::asc("w".to_string()));
        table.set_sort(SortSpec::unsorted());
        assert_eq!(ids(&table.view()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_page_reclamped_when_filter_shrinks_rows() {
        let mut table = TableEngine::new(numbered(50), config(10));
        table.go_to(5);
        assert_eq!(table.current_page(), 5);

        table.insert_filter(Filter::new("v", |r: &Record| {
            r.get_int("v").ok().flatten().is_some_and(|v| v <= 20)
        }));
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.view().rows.len(), 10);
    }

    #[test]
    fn test_empty_states_are_distinct() {
        let mut table = TableEngine::new(Vec::new(), config(10));
        let nothing = table.view().state.message();
        assert_eq!(table.view().state, TableState::NothingYet("Nothing here yet"));

        table.set_rows(numbered(4));
        table.insert_filter(Filter::new("none", |_: &Record| false));
        assert_eq!(table.view().state, TableState::NoResults);
        assert_ne!(table.view().state.message(), nothing);
    }

    #[test]
    fn test_summary() {
        let mut table = TableEngine::new(numbered(45), config(10));
        table.go_to(2);
        let view = table.view();
        assert_eq!(view.summary().as_deref(), Some("Displaying results 11-20 of 45"));

        table.go_to(5);
        assert_eq!(
            table.view().summary().as_deref(),
            Some("Displaying results 41-45 of 45")
        );
    }

    #[test]
    fn test_pages_hidden_for_single_page() {
        let table = TableEngine::new(numbered(4), config(10));
        assert!(table.view().pages.is_empty());
    }

    #[test]
    fn test_set_rows_per_page_reclamps() {
        let mut table = TableEngine::new(numbered(30), config(5));
        table.go_to(6);
        table.set_rows_per_page(15);
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.total_pages(), 2);
    }
}
