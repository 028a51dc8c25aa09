//! Page slicing, page counts and the compact page-number window.

use std::fmt;
use std::ops::Range;

/// Page size used when a configuration does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Numeric form of [`PageLink::Ellipsis`].
pub const ELLIPSIS: i64 = -1;

/// Up to this many pages the window lists every page.
const MAX_VISIBLE_PAGES: usize = 5;

/// One entry of the page-number window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLink {
    /// A real, 1-based page number.
    Page(usize),
    /// A gap between page numbers.
    Ellipsis,
}

impl PageLink {
    /// The page number, or [`ELLIPSIS`] for a gap.
    pub fn number(&self) -> i64 {
        match self {
            PageLink::Page(page) => *page as i64,
            PageLink::Ellipsis => ELLIPSIS,
        }
    }

    /// Returns `true` for the gap marker.
    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageLink::Ellipsis)
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLink::Page(page) => write!(f, "{}", page),
            PageLink::Ellipsis => f.write_str("…"),
        }
    }
}

/// One page of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Rows on this page.
    pub items: &'a [T],
    /// Number of pages in the whole sequence.
    pub total_pages: usize,
}

/// Number of pages needed for `len` rows. Zero when there are no rows.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Offsets of `page` (1-based) within a sequence of `len` rows.
///
/// The range is clipped to `len` and empty when the page is out of bounds.
pub fn page_range(len: usize, page_size: usize, page: usize) -> Range<usize> {
    if page == 0 || page_size == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Slice out one page of `rows`.
///
/// # Example
///
/// ```
/// use banca_table::paginate::paginate;
///
/// let rows: Vec<u32> = (1..=23).collect();
/// let page = paginate(&rows, 10, 3);
/// assert_eq!(page.items, &[21, 22, 23]);
/// assert_eq!(page.total_pages, 3);
/// ```
pub fn paginate<T>(rows: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    Page {
        items: &rows[page_range(rows.len(), page_size, page)],
        total_pages: total_pages(rows.len(), page_size),
    }
}

/// Compact page-number window for navigation controls.
///
/// Short sequences list every page; longer ones keep the first and last
/// page, the neighbourhood of the current page, and gaps in between.
///
/// # Example
///
/// ```
/// use banca_table::paginate::{page_numbers, PageLink};
///
/// let numbers: Vec<i64> = page_numbers(5, 10).iter().map(PageLink::number).collect();
/// assert_eq!(numbers, vec![1, -1, 4, 5, 6, -1, 10]);
/// ```
pub fn page_numbers(current: usize, total: usize) -> Vec<PageLink> {
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageLink::Page).collect();
    }

    if current <= 3 {
        let mut pages: Vec<PageLink> = (1..=4).map(PageLink::Page).collect();
        pages.push(PageLink::Ellipsis);
        pages.push(PageLink::Page(total));
        pages
    } else if current >= total - 2 {
        let mut pages = vec![PageLink::Page(1), PageLink::Ellipsis];
        pages.extend((total - 3..=total).map(PageLink::Page));
        pages
    } else {
        vec![
            PageLink::Page(1),
            PageLink::Ellipsis,
            PageLink::Page(current - 1),
            PageLink::Page(current),
            PageLink::Page(current + 1),
            PageLink::Ellipsis,
            PageLink::Page(total),
        ]
    }
}

/// Human-readable range of the rows on the current page, e.g. `"21-23 de 23"`.
pub fn display_range(len: usize, page: usize, page_size: usize) -> String {
    if len == 0 {
        return "0 de 0".to_string();
    }
    let start = page.saturating_sub(1).saturating_mul(page_size) + 1;
    let end = page.saturating_mul(page_size).min(len);
    format!("{}-{} de {}", start, end, len)
}
