//! Table engine - the search/paginate pipeline behind every table view.
//!
//! The engine holds the rows and configuration supplied by its owning view
//! plus the user's search term, page and page size. Every mutator ends in
//! a single [`recompute`](TableEngine::recompute) that re-derives the
//! filtered rows, the page count and the rows on the current page.
//!
//! Rows are opaque. Each row is serialized once when it is supplied and
//! all field access goes through [`path::resolve`](crate::path::resolve)
//! on that projection.

mod events;
mod recovery;

use std::ops::Range;

use serde::Serialize;
use serde_json::Value;

use crate::config::Column;
use crate::config::ColumnKind;
use crate::config::TableConfig;
use crate::filter;
use crate::format;
use crate::paginate;
use crate::paginate::DEFAULT_PAGE_SIZE;
use crate::paginate::PageLink;
use crate::path;

pub use events::TableEvent;
pub use recovery::PageRecovery;

/// Search, pagination and formatting state for one table.
///
/// # Example
///
/// ```
/// use banca_table::{Column, TableConfig, TableEngine};
/// use serde_json::json;
///
/// let config = TableConfig::new("Movimientos")
///     .column(Column::new("tipo", "Tipo"))
///     .search(&[], "Buscar...")
///     .pageable(2);
/// let rows = vec![
///     json!({ "tipo": "DEPOSITO" }),
///     json!({ "tipo": "RETIRO" }),
///     json!({ "tipo": "DEPOSITO" }),
/// ];
///
/// let mut table = TableEngine::new(config, rows);
/// assert_eq!(table.total_pages(), 2);
///
/// table.set_search_term("depo");
/// assert_eq!(table.filtered_len(), 2);
/// assert_eq!(table.display_range(), "1-2 de 2");
/// ```
#[derive(Debug, Clone)]
pub struct TableEngine<T> {
    config: TableConfig,
    rows: Vec<T>,
    /// Serialized form of `rows`, index-aligned.
    projections: Vec<Value>,
    search_term: String,
    current_page: usize,
    page_size: usize,
    recovery: PageRecovery,

    /// Indices into `rows` that pass the search filter.
    filtered: Vec<usize>,
    /// Range of `filtered` shown on the current page.
    displayed: Range<usize>,
    total_pages: usize,

    events: Vec<TableEvent<T>>,
}

impl<T: Serialize + Clone> TableEngine<T> {
    /// Create an engine for the given configuration and rows.
    ///
    /// The page size starts at the configuration's page size, or
    /// [`DEFAULT_PAGE_SIZE`] when that is zero.
    pub fn new(config: TableConfig, rows: Vec<T>) -> Self {
        let page_size = if config.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            config.page_size
        };
        let projections = rows.iter().map(filter::project).collect();

        let mut engine = Self {
            config,
            rows,
            projections,
            search_term: String::new(),
            current_page: 1,
            page_size,
            recovery: PageRecovery::default(),
            filtered: Vec::new(),
            displayed: 0..0,
            total_pages: 0,
            events: Vec::new(),
        };
        engine.recompute();
        engine
    }

    /// Use a different recovery policy for pages that no longer exist.
    pub fn with_recovery(mut self, recovery: PageRecovery) -> Self {
        self.recovery = recovery;
        self.recompute();
        self
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Replace the rows and go back to the first page.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.projections = rows.iter().map(filter::project).collect();
        self.rows = rows;
        self.current_page = 1;
        self.recompute();
    }

    /// Replace the rows but stay on the current page.
    ///
    /// Used after a reload triggered from a row action. If the current page
    /// no longer exists the recovery policy picks the page to show.
    pub fn refresh_rows(&mut self, rows: Vec<T>) {
        self.projections = rows.iter().map(filter::project).collect();
        self.rows = rows;
        self.recompute();
    }

    /// Replace the configuration and go back to the first page.
    ///
    /// The current page size and search term are kept.
    pub fn set_config(&mut self, config: TableConfig) {
        self.config = config;
        self.current_page = 1;
        self.recompute();
    }

    /// Replace configuration and rows together, e.g. when a view switches
    /// to a differently shaped data set.
    pub fn replace(&mut self, config: TableConfig, rows: Vec<T>) {
        self.config = config;
        self.set_rows(rows);
    }

    /// Set the search term and go back to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
        self.recompute();
    }

    /// Go to `page` (1-based).
    ///
    /// Pages outside `1..=total_pages` are ignored. Returns `true` if the
    /// page was accepted.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            log::debug!(
                "Ignoring page {} outside 1..={} in '{}'",
                page,
                self.total_pages,
                self.config.title
            );
            return false;
        }
        self.current_page = page;
        self.recompute();
        true
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current_page + 1)
    }

    /// Go to the previous page, if any.
    pub fn previous_page(&mut self) -> bool {
        self.set_page(self.current_page.saturating_sub(1))
    }

    /// Set the page size and go back to the first page.
    ///
    /// A zero size is ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            log::warn!("Ignoring zero page size in '{}'", self.config.title);
            return;
        }
        self.page_size = size;
        self.current_page = 1;
        self.recompute();
    }

    // -------------------------------------------------------------------------
    // Signals
    // -------------------------------------------------------------------------

    /// Raise a create request for the owning view.
    pub fn request_create(&mut self) {
        self.events.push(TableEvent::CreateRequested);
    }

    /// Raise an action request for the displayed row at `index`.
    ///
    /// Returns `false` if there is no such row on the current page.
    pub fn request_action(&mut self, action: impl Into<String>, index: usize) -> bool {
        let Some(row) = self.displayed_row(index).cloned() else {
            return false;
        };
        self.events.push(TableEvent::ActionRequested {
            action: action.into(),
            row,
        });
        true
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<TableEvent<T>> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Re-derive filtered rows, page count and displayed rows.
    fn recompute(&mut self) {
        self.filtered =
            filter::filter_indices(&self.projections, &self.config, &self.search_term);

        if self.config.pageable {
            self.total_pages = paginate::total_pages(self.filtered.len(), self.page_size);
            self.current_page = self.recovery.recover(self.current_page, self.total_pages);
            self.displayed =
                paginate::page_range(self.filtered.len(), self.page_size, self.current_page);
        } else {
            self.total_pages = usize::from(!self.filtered.is_empty());
            self.current_page = 1;
            self.displayed = 0..self.filtered.len();
        }

        log::debug!(
            "Recomputed '{}': {} rows, {} filtered, page {}/{}",
            self.config.title,
            self.rows.len(),
            self.filtered.len(),
            self.current_page,
            self.total_pages
        );
    }
}

impl<T> TableEngine<T> {
    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The active configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// All rows, unfiltered.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The current page (1-based).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of rows that pass the search filter.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Rows that pass the search filter, in order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.filtered.iter().map(|&i| &self.rows[i])
    }

    /// Rows on the current page, in order.
    pub fn displayed_rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.filtered[self.displayed.clone()]
            .iter()
            .map(|&i| &self.rows[i])
    }

    /// Number of rows on the current page.
    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    /// The row at `index` on the current page.
    pub fn displayed_row(&self, index: usize) -> Option<&T> {
        self.displayed_index(index).map(|i| &self.rows[i])
    }

    /// Returns `true` when no rows pass the filter.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Compact page-number window for the current page.
    pub fn page_numbers(&self) -> Vec<PageLink> {
        paginate::page_numbers(self.current_page, self.total_pages)
    }

    /// Text like `"21-23 de 23"` describing the rows on screen.
    pub fn display_range(&self) -> String {
        if self.config.pageable {
            paginate::display_range(self.filtered.len(), self.current_page, self.page_size)
        } else {
            paginate::display_range(self.filtered.len(), 1, self.filtered.len())
        }
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    /// Raw value of `key` for the displayed row at `index`.
    pub fn value(&self, index: usize, key: &str) -> Option<&Value> {
        self.displayed_index(index)
            .and_then(|i| path::resolve(&self.projections[i], key))
    }

    /// Display text for a cell. Badge columns show their badge label.
    pub fn cell_text(&self, index: usize, column: &Column) -> String {
        let value = self.value(index, &column.key);
        match column.kind {
            ColumnKind::Badge => format::badge_label(value, column),
            _ => format::format_value(value, column),
        }
    }

    /// Badge style class for a cell, or `""` for non-badge columns.
    pub fn badge_class<'c>(&self, index: usize, column: &'c Column) -> &'c str {
        format::badge_class(self.value(index, &column.key), column)
    }

    fn displayed_index(&self, index: usize) -> Option<usize> {
        if index >= self.displayed.len() {
            return None;
        }
        self.filtered.get(self.displayed.start + index).copied()
    }
}
