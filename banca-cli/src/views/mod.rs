//! Feature views.
//!
//! Each view owns one [`TableEngine`] over its record type, loads rows
//! through the [`BancaClient`] and routes the engine's events back to the
//! API. The console only sees views through the object-safe [`View`] and
//! [`TableControl`] traits, so it can switch between them without knowing
//! their row types.

mod clientes;
mod cuentas;
mod movimientos;
mod reportes;

pub use clientes::ClientesView;
pub use cuentas::CuentasView;
pub use movimientos::Filtro;
pub use movimientos::MovimientosView;
pub use reportes::ReporteFila;
pub use reportes::ReportesView;

use std::path::PathBuf;

use async_trait::async_trait;
use banca_lib::BancaClient;
use banca_table::Column;
use banca_table::PageLink;
use banca_table::TableConfig;
use banca_table::TableEngine;
use serde::Serialize;

use crate::error::CliError;

/// Page sizes offered when a table does not list its own.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

// =============================================================================
// TableControl
// =============================================================================

/// Row-type-erased access to a [`TableEngine`].
pub trait TableControl: Send {
    fn config(&self) -> &TableConfig;
    fn search_term(&self) -> &str;
    fn current_page(&self) -> usize;
    fn page_size(&self) -> usize;
    fn total_pages(&self) -> usize;
    fn filtered_len(&self) -> usize;
    fn displayed_len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn has_previous(&self) -> bool;
    fn has_next(&self) -> bool;
    fn page_numbers(&self) -> Vec<PageLink>;
    fn display_range(&self) -> String;
    fn cell_text(&self, index: usize, column: &Column) -> String;

    fn set_search_term(&mut self, term: &str);
    fn set_page(&mut self, page: usize) -> bool;
    fn next_page(&mut self) -> bool;
    fn previous_page(&mut self) -> bool;
    fn set_page_size(&mut self, size: usize);
    fn request_create(&mut self);
    fn request_action(&mut self, action: &str, index: usize) -> bool;
}

impl<T: Serialize + Clone + Send> TableControl for TableEngine<T> {
    fn config(&self) -> &TableConfig {
        TableEngine::config(self)
    }

    fn search_term(&self) -> &str {
        TableEngine::search_term(self)
    }

    fn current_page(&self) -> usize {
        TableEngine::current_page(self)
    }

    fn page_size(&self) -> usize {
        TableEngine::page_size(self)
    }

    fn total_pages(&self) -> usize {
        TableEngine::total_pages(self)
    }

    fn filtered_len(&self) -> usize {
        TableEngine::filtered_len(self)
    }

    fn displayed_len(&self) -> usize {
        TableEngine::displayed_len(self)
    }

    fn is_empty(&self) -> bool {
        TableEngine::is_empty(self)
    }

    fn has_previous(&self) -> bool {
        TableEngine::has_previous(self)
    }

    fn has_next(&self) -> bool {
        TableEngine::has_next(self)
    }

    fn page_numbers(&self) -> Vec<PageLink> {
        TableEngine::page_numbers(self)
    }

    fn display_range(&self) -> String {
        TableEngine::display_range(self)
    }

    fn cell_text(&self, index: usize, column: &Column) -> String {
        TableEngine::cell_text(self, index, column)
    }

    fn set_search_term(&mut self, term: &str) {
        TableEngine::set_search_term(self, term)
    }

    fn set_page(&mut self, page: usize) -> bool {
        TableEngine::set_page(self, page)
    }

    fn next_page(&mut self) -> bool {
        TableEngine::next_page(self)
    }

    fn previous_page(&mut self) -> bool {
        TableEngine::previous_page(self)
    }

    fn set_page_size(&mut self, size: usize) {
        TableEngine::set_page_size(self, size)
    }

    fn request_create(&mut self) {
        TableEngine::request_create(self)
    }

    fn request_action(&mut self, action: &str, index: usize) -> bool {
        TableEngine::request_action(self, action, index)
    }
}

// =============================================================================
// View
// =============================================================================

/// A screen of the console: one table plus the API calls behind it.
#[async_trait]
pub trait View: Send {
    /// Short name used to switch to the view, e.g. `"clientes"`.
    fn name(&self) -> &'static str;

    fn table(&self) -> &dyn TableControl;

    fn table_mut(&mut self) -> &mut dyn TableControl;

    /// Fetch the view's rows again. The current page is kept when it
    /// still exists.
    async fn load(&mut self, client: &BancaClient) -> Result<(), CliError>;

    /// Act on queued table events, returning messages for the user.
    async fn process_events(&mut self, client: &BancaClient) -> Result<Vec<String>, CliError>;

    /// Run a view-specific command. `args[0]` is the command word.
    async fn command(
        &mut self,
        _client: &BancaClient,
        args: &[String],
    ) -> Result<Vec<String>, CliError> {
        Err(unknown_command(args))
    }

    /// Usage lines for the view-specific commands.
    fn help(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Every view, in menu order.
pub fn all(download_dir: PathBuf) -> Vec<Box<dyn View>> {
    vec![
        Box::new(ClientesView::new()),
        Box::new(CuentasView::new()),
        Box::new(MovimientosView::new()),
        Box::new(ReportesView::new(download_dir)),
    ]
}

// =============================================================================
// Helpers
// =============================================================================

pub(crate) fn unknown_command(args: &[String]) -> CliError {
    CliError::command(format!("Comando desconocido: {}", args.join(" ")))
}

/// Parse a record id argument.
pub(crate) fn parse_id(arg: Option<&String>, what: &str) -> Result<i64, CliError> {
    let arg = arg.ok_or_else(|| CliError::command(format!("Falta el ID de {}", what)))?;
    arg.parse()
        .map_err(|_| CliError::command(format!("ID de {} inválido: {}", what, arg)))
}

/// The id of a fetched record. Records read from the API always carry one.
pub(crate) fn require_id(id: Option<i64>, what: &str) -> Result<i64, CliError> {
    id.ok_or_else(|| CliError::command(format!("El registro de {} no tiene ID", what)))
}

/// Message for actions that need an input form.
pub(crate) fn form_unavailable(what: &str) -> String {
    format!("El formulario de {} no está disponible en la consola", what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_order() {
        let views = all(PathBuf::from("."));
        let names: Vec<&str> = views.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["clientes", "cuentas", "movimientos", "reportes"]);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some(&"42".to_string()), "cliente").unwrap(), 42);
        assert!(parse_id(Some(&"x".to_string()), "cliente").is_err());
        assert!(parse_id(None, "cliente").is_err());
    }
}
