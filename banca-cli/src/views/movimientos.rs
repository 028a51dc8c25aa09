//! Movement listing, optionally narrowed to one account or customer and a
//! date range.

use async_trait::async_trait;
use banca_lib::BancaClient;
use banca_lib::model::Movimiento;
use banca_lib::model::RangoFechas;
use banca_table::Column;
use banca_table::TableConfig;
use banca_table::TableEngine;
use banca_table::TableEvent;

use super::PAGE_SIZE_OPTIONS;
use super::TableControl;
use super::View;
use super::parse_id;
use super::unknown_command;
use crate::error::CliError;

const HELP: &[&str] = &[
    "todos                             todos los movimientos",
    "cuenta ID [DESDE HASTA]           movimientos de una cuenta",
    "cliente ID [DESDE HASTA]          movimientos de un cliente",
    "                                  fechas en dd/mm/aaaa o aaaa-mm-dd",
];

/// Which movements are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filtro {
    #[default]
    Todos,
    Cuenta(i64, Option<RangoFechas>),
    Cliente(i64, Option<RangoFechas>),
}

impl Filtro {
    /// Parses `cuenta ID [DESDE HASTA]`, `cliente ID [DESDE HASTA]` or `todos`.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let kind = args.first().map(String::as_str);
        if kind == Some("todos") {
            return Ok(Filtro::Todos);
        }

        let what = match kind {
            Some("cuenta") => "cuenta",
            Some("cliente") => "cliente",
            _ => return Err(unknown_command(args)),
        };
        let id = parse_id(args.get(1), what)?;

        let rango = match (args.get(2), args.get(3)) {
            (None, _) => None,
            (Some(inicio), Some(fin)) => Some(RangoFechas::parse(inicio, fin).ok_or_else(|| {
                CliError::command(format!("Fechas inválidas: {} {}", inicio, fin))
            })?),
            (Some(_), None) => {
                return Err(CliError::command("Indique fecha de inicio y fecha de fin"));
            }
        };

        Ok(match what {
            "cuenta" => Filtro::Cuenta(id, rango),
            _ => Filtro::Cliente(id, rango),
        })
    }
}

pub struct MovimientosView {
    table: TableEngine<Movimiento>,
    filtro: Filtro,
}

impl MovimientosView {
    pub fn new() -> Self {
        Self {
            table: TableEngine::new(table_config(), Vec::new()),
            filtro: Filtro::Todos,
        }
    }

    pub fn engine(&self) -> &TableEngine<Movimiento> {
        &self.table
    }

    pub fn filtro(&self) -> Filtro {
        self.filtro
    }
}

impl Default for MovimientosView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for MovimientosView {
    fn name(&self) -> &'static str {
        "movimientos"
    }

    fn table(&self) -> &dyn TableControl {
        &self.table
    }

    fn table_mut(&mut self) -> &mut dyn TableControl {
        &mut self.table
    }

    async fn load(&mut self, client: &BancaClient) -> Result<(), CliError> {
        let rows = fetch(client, self.filtro).await?;
        log::debug!("Loaded {} movimientos for {:?}", rows.len(), self.filtro);
        self.table.refresh_rows(rows);
        Ok(())
    }

    async fn process_events(&mut self, _client: &BancaClient) -> Result<Vec<String>, CliError> {
        // No create button and no row actions.
        for event in self.table.drain_events() {
            if let TableEvent::ActionRequested { action, .. } = event {
                log::warn!("Unhandled movimiento action: {}", action);
            }
        }
        Ok(Vec::new())
    }

    async fn command(&mut self, client: &BancaClient, args: &[String]) -> Result<Vec<String>, CliError> {
        let filtro = Filtro::parse(args)?;
        // A failed lookup leaves the current listing untouched.
        let rows = fetch(client, filtro).await?;

        let message = if rows.is_empty() {
            "No se encontraron movimientos para los filtros aplicados.".to_string()
        } else {
            format!("Se encontraron {} movimiento(s).", rows.len())
        };
        self.filtro = filtro;
        self.table.set_rows(rows);
        Ok(vec![message])
    }

    fn help(&self) -> &'static [&'static str] {
        HELP
    }
}

async fn fetch(client: &BancaClient, filtro: Filtro) -> Result<Vec<Movimiento>, CliError> {
    let movimientos = client.movimientos();
    let rows = match filtro {
        Filtro::Todos => movimientos.list().await?,
        Filtro::Cuenta(id, None) => movimientos.list_by_cuenta(id).await?,
        Filtro::Cuenta(id, Some(rango)) => movimientos.list_by_cuenta_rango(id, &rango).await?,
        Filtro::Cliente(id, None) => movimientos.list_by_cliente(id).await?,
        Filtro::Cliente(id, Some(rango)) => movimientos.list_by_cliente_rango(id, &rango).await?,
    };
    Ok(rows)
}

pub(crate) fn table_config() -> TableConfig {
    TableConfig::new("Listado de Movimientos")
        .column(Column::new("id", "ID"))
        .column(Column::new("tipo", "Tipo"))
        .column(Column::new("numeroCuenta", "Cuenta"))
        .column(Column::new("nombreCliente", "Cliente"))
        .column(Column::new("valor", "Valor").currency("USD"))
        .column(Column::new("saldoAnterior", "Saldo Anterior").currency("USD"))
        .column(Column::new("saldoNuevo", "Saldo Nuevo").currency("USD"))
        .column(Column::new("fechaMovimiento", "Fecha").date())
        .search(
            &["numeroCuenta", "nombreCliente", "tipo"],
            "Buscar por cuenta, cliente o tipo...",
        )
        .pageable(10)
        .page_size_options(&PAGE_SIZE_OPTIONS)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(Filtro::parse(&args("todos")).unwrap(), Filtro::Todos);
        assert_eq!(Filtro::parse(&args("cuenta 7")).unwrap(), Filtro::Cuenta(7, None));

        let rango = RangoFechas::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        assert_eq!(
            Filtro::parse(&args("cliente 3 01/01/2026 2026-01-31")).unwrap(),
            Filtro::Cliente(3, Some(rango))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Filtro::parse(&args("cuenta")).is_err());
        assert!(Filtro::parse(&args("cuenta 7 01/01/2026")).is_err());
        assert!(Filtro::parse(&args("cuenta 7 ayer hoy")).is_err());
        assert!(Filtro::parse(&args("saldo 7")).is_err());
    }
}
