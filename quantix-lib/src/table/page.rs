//! Page window arithmetic and the compact pager layout.

use std::fmt;
use std::ops::Range;

/// Number of pages needed for `len` rows. Zero rows need zero pages.
///
/// # Panics
///
/// Panics if `rows_per_page` is zero.
pub fn total_pages(len: usize, rows_per_page: usize) -> usize {
    len.div_ceil(rows_per_page)
}

/// Clamps a 1-based page into `1..=max(1, total_pages)`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of the rows shown on `page`, cut to `len`.
pub fn page_range(len: usize, page: usize, rows_per_page: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(rows_per_page).min(len);
    let end = start.saturating_add(rows_per_page).min(len);
    start..end
}

/// The rows shown on a 1-based page. Past the end this is empty.
pub fn paginate<T>(rows: &[T], page: usize, rows_per_page: usize) -> &[T] {
    &rows[page_range(rows.len(), page, rows_per_page)]
}

/// One button of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A page number.
    Page(usize),
    /// A gap between page numbers.
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Lays out the pager buttons for `current` out of `total` pages.
///
/// Up to five pages are all listed. Otherwise the first five pages are shown
/// while `current` is below 5, the last five once it is within three pages of
/// the end, and the neighbours of `current` with ellipses in between.
pub fn page_items(total: usize, current: usize) -> Vec<PageItem> {
    use PageItem::*;

    if total <= 5 {
        return (1..=total).map(Page).collect();
    }
    if current < 5 {
        return vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(total)];
    }
    if current > total - 3 {
        let mut items = vec![Page(1), Ellipsis];
        items.extend((total - 4..=total).map(Page));
        return items;
    }

    let mut items = Vec::with_capacity(7);
    if current != 2 {
        items.push(Page(1));
    }
    if current > 4 {
        items.push(Ellipsis);
    }
    items.extend([Page(current - 1), Page(current), Page(current + 1)]);
    if current < total - 2 {
        items.push(Ellipsis);
    }
    if current != total - 1 {
        items.push(Page(total));
    }
    items
}

/// The current page of a table and its page size.
///
/// `page` is 1-based and kept within `1..=max(1, total_pages)` by [`clamp`].
///
/// [`clamp`]: PageWindow::clamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    rows_per_page: usize,
}

impl PageWindow {
    /// Creates a window on page 1.
    ///
    /// `rows_per_page` must be positive.
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            page: 1,
            rows_per_page,
        }
    }

    /// Returns the current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Changes the page size and re-clamps against `len` rows.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize, len: usize) {
        self.rows_per_page = rows_per_page;
        self.clamp(len);
    }

    /// Number of pages for `len` rows.
    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.rows_per_page)
    }

    /// Pulls the page back into range for `len` rows.
    ///
    /// Returns `true` if the page changed.
    pub fn clamp(&mut self, len: usize) -> bool {
        let clamped = clamp_page(self.page, self.total_pages(len));
        let changed = clamped != self.page;
        if changed {
            log::debug!("Re-clamped page {} to {}", self.page, clamped);
        }
        self.page = clamped;
        changed
    }

    /// Jumps to `page`, clamped for `len` rows.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = clamp_page(page, self.total_pages(len));
    }

    /// Parses a typed page number and jumps to it.
    ///
    /// Non-numeric input is ignored and returns `false`.
    pub fn go_to_input(&mut self, input: &str, len: usize) -> bool {
        match input.trim().parse::<i64>() {
            Ok(page) => {
                let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
                self.go_to(page, len);
                true
            }
            Err(_) => false,
        }
    }

    /// Moves to the next page if there is one.
    pub fn next(&mut self, len: usize) {
        if self.page < self.total_pages(len) {
            self.page += 1;
        }
    }

    /// Moves to the previous page if there is one.
    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Index range of the current page for `len` rows.
    pub fn range(&self, len: usize) -> Range<usize> {
        page_range(len, self.page, self.rows_per_page)
    }

    /// Pager buttons for `len` rows.
    pub fn items(&self, len: usize) -> Vec<PageItem> {
        page_items(self.total_pages(len), self.page)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::*;

    #[test]
    fn test_pages_cover_rows_exactly() {
        let rows: Vec<u32> = (0..23).collect();
        assert_eq!(total_pages(rows.len(), 10), 3);

        let sizes: Vec<_> = (1..=3).map(|p| paginate(&rows, p, 10).len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);

        let joined: Vec<u32> = (1..=3).flat_map(|p| paginate(&rows, p, 10).to_vec()).collect();
        assert_eq!(joined, rows);
        assert!(paginate(&rows, 4, 10).is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(5, 2), 2);
        assert_eq!(clamp_page(0, 2), 1);
        assert_eq!(clamp_page(3, 0), 1);
    }

    #[test]
    fn test_page_items_small() {
        assert_eq!(page_items(3, 2), vec![Page(1), Page(2), Page(3)]);
        assert!(page_items(0, 1).is_empty());
    }

    #[test]
    fn test_page_items_near_start() {
        assert_eq!(
            page_items(20, 3),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_page_items_near_end() {
        assert_eq!(
            page_items(20, 19),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_page_items_middle() {
        assert_eq!(
            page_items(20, 10),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_items(8, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(8)]
        );
    }

    #[test]
    fn test_go_to_input() {
        let mut window = PageWindow::new(10);
        assert!(window.go_to_input("7", 45));
        assert_eq!(window.page(), 5);
        assert!(window.go_to_input("-3", 45));
        assert_eq!(window.page(), 1);
        assert!(!window.go_to_input("abc", 45));
        assert_eq!(window.page(), 1);
    }

    #[test]
    fn test_next_prev_stop_at_edges() {
        let mut window = PageWindow::new(10);
        window.prev();
        assert_eq!(window.page(), 1);
        window.next(15);
        window.next(15);
        assert_eq!(window.page(), 2);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut window = PageWindow::new(10);
        window.go_to(5, 50);
        assert!(window.clamp(12));
        assert_eq!(window.page(), 2);
    }
}
