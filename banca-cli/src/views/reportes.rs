//! Reports: generate, browse, download and mail.
//!
//! The table's configuration is swapped for each kind of report. Customer
//! reports nest movements under accounts; they are flattened into one row
//! per movement tagged with its account.

use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use banca_lib::BancaClient;
use banca_lib::api::AlcanceReporte;
use banca_lib::model::CuentaResumen;
use banca_lib::model::EnvioReporte;
use banca_lib::model::FormatoArchivo;
use banca_lib::model::MovimientoDeCuenta;
use banca_lib::model::RangoFechas;
use banca_lib::model::ReporteMovimiento;
use banca_lib::model::parse_fecha;
use banca_table::BadgeConfig;
use banca_table::Column;
use banca_table::TableConfig;
use banca_table::TableEngine;
use chrono::Datelike;
use chrono::NaiveDate;
use serde::Serialize;

use super::PAGE_SIZE_OPTIONS;
use super::TableControl;
use super::View;
use super::parse_id;
use super::unknown_command;
use crate::error::CliError;

const HELP: &[&str] = &[
    "general [DESDE HASTA]              reporte general de cuentas",
    "cuenta ID [DESDE HASTA]            movimientos de una cuenta",
    "cliente ID [DESDE HASTA]           movimientos de un cliente",
    "descargar pdf|excel                guardar el reporte actual",
    "enviar EMAIL pdf|excel ASUNTO...   enviar el reporte actual por correo",
    "                                   sin fechas: mes en curso",
];

const SEARCH_PLACEHOLDER: &str = "Buscar en movimientos...";

/// One row of any report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReporteFila {
    Cuenta(CuentaResumen),
    Movimiento(ReporteMovimiento),
    MovimientoCliente(MovimientoDeCuenta),
}

pub struct ReportesView {
    table: TableEngine<ReporteFila>,
    download_dir: PathBuf,
    actual: Option<(AlcanceReporte, RangoFechas)>,
}

impl ReportesView {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            table: TableEngine::new(empty_config(), Vec::new()),
            download_dir,
            actual: None,
        }
    }

    pub fn engine(&self) -> &TableEngine<ReporteFila> {
        &self.table
    }

    /// The report on screen.
    pub fn actual(&self) -> Option<(AlcanceReporte, RangoFechas)> {
        self.actual
    }

    async fn generar(&mut self, client: &BancaClient, args: &[String]) -> Result<Vec<String>, CliError> {
        let (alcance, fechas) = match args[0].as_str() {
            "general" => (AlcanceReporte::General, &args[1..]),
            "cuenta" => (AlcanceReporte::Cuenta(parse_id(args.get(1), "cuenta")?), &args[2..]),
            "cliente" => (AlcanceReporte::Cliente(parse_id(args.get(1), "cliente")?), &args[2..]),
            _ => return Err(unknown_command(args)),
        };
        let rango = parse_rango(fechas, today())?;

        let (config, rows) = fetch(client, alcance, &rango).await?;
        let count = rows.len();
        self.table.replace(config, rows);
        self.actual = Some((alcance, rango));

        log::info!("Generated {:?} report for {:?}", alcance, rango);
        Ok(vec![format!("¡Reporte generado! {} registro(s)", count)])
    }

    fn require_actual(&self) -> Result<(AlcanceReporte, RangoFechas), CliError> {
        self.actual
            .ok_or_else(|| CliError::command("Genere un reporte antes de descargarlo o enviarlo"))
    }

    async fn descargar(&self, client: &BancaClient, args: &[String]) -> Result<Vec<String>, CliError> {
        let (alcance, rango) = self.require_actual()?;
        let formato = parse_formato(args.get(1))?;

        let archivo = client.reportes().download(alcance, &rango, formato).await?;
        let path = archivo.save_to(&self.download_dir).await?;
        log::info!("Downloaded {} report to {}", formato, path.display());
        Ok(vec![format!("¡{} descargado! {}", formato_label(formato), path.display())])
    }

    async fn enviar(&self, client: &BancaClient, args: &[String]) -> Result<Vec<String>, CliError> {
        let (alcance, rango) = self.require_actual()?;
        let (Some(email), Some(_), true) = (args.get(1), args.get(2), args.len() > 3) else {
            return Err(CliError::command("Por favor complete el email y el asunto."));
        };
        let formato = parse_formato(args.get(2))?;
        let envio = EnvioReporte::new(email.as_str(), formato).asunto(args[3..].join(" "));

        let respuesta = client.reportes().send(alcance, &rango, &envio).await?;
        log::info!("Mailed {} report to {}", formato, email);
        let mut messages = vec![format!("¡Email enviado a {}!", email)];
        if !respuesta.trim().is_empty() {
            messages.push(respuesta);
        }
        Ok(messages)
    }
}

#[async_trait]
impl View for ReportesView {
    fn name(&self) -> &'static str {
        "reportes"
    }

    fn table(&self) -> &dyn TableControl {
        &self.table
    }

    fn table_mut(&mut self) -> &mut dyn TableControl {
        &mut self.table
    }

    async fn load(&mut self, client: &BancaClient) -> Result<(), CliError> {
        let Some((alcance, rango)) = self.actual else {
            return Ok(());
        };
        let (config, rows) = fetch(client, alcance, &rango).await?;
        if self.table.config() == &config {
            self.table.refresh_rows(rows);
        } else {
            self.table.replace(config, rows);
        }
        Ok(())
    }

    async fn process_events(&mut self, _client: &BancaClient) -> Result<Vec<String>, CliError> {
        // Report tables are read-only.
        let events = self.table.drain_events();
        if !events.is_empty() {
            log::warn!("Ignoring {} report table event(s)", events.len());
        }
        Ok(Vec::new())
    }

    async fn command(&mut self, client: &BancaClient, args: &[String]) -> Result<Vec<String>, CliError> {
        match args.first().map(String::as_str) {
            Some("general" | "cuenta" | "cliente") => self.generar(client, args).await,
            Some("descargar") => self.descargar(client, args).await,
            Some("enviar") => self.enviar(client, args).await,
            _ => Err(unknown_command(args)),
        }
    }

    fn help(&self) -> &'static [&'static str] {
        HELP
    }
}

// =============================================================================
// Fetching
// =============================================================================

async fn fetch(
    client: &BancaClient,
    alcance: AlcanceReporte,
    rango: &RangoFechas,
) -> Result<(TableConfig, Vec<ReporteFila>), CliError> {
    let reportes = client.reportes();
    let table = match alcance {
        AlcanceReporte::General => {
            let reporte = reportes.general(rango).await?;
            (
                general_config(),
                reporte.cuentas.into_iter().map(ReporteFila::Cuenta).collect(),
            )
        }
        AlcanceReporte::Cuenta(id) => {
            let reporte = reportes.cuenta(id, rango).await?;
            (
                cuenta_config(&reporte.numero_cuenta),
                reporte.movimientos.into_iter().map(ReporteFila::Movimiento).collect(),
            )
        }
        AlcanceReporte::Cliente(id) => {
            let reporte = reportes.cliente(id, rango).await?;
            (
                cliente_config(&reporte.nombre_cliente),
                reporte
                    .movimientos()
                    .into_iter()
                    .map(ReporteFila::MovimientoCliente)
                    .collect(),
            )
        }
    };
    Ok(table)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parses `[DESDE HASTA]`. Without dates the range is the month of `today`
/// up to `today`.
fn parse_rango(args: &[String], today: NaiveDate) -> Result<RangoFechas, CliError> {
    match args {
        [] => {
            let inicio = today.with_day(1).unwrap_or(today);
            Ok(RangoFechas::new(inicio, today))
        }
        [inicio, fin] => {
            let inicio = parse_fecha(inicio)
                .ok_or_else(|| CliError::command(format!("Fecha inválida: {}", inicio)))?;
            let fin = parse_fecha(fin)
                .ok_or_else(|| CliError::command(format!("Fecha inválida: {}", fin)))?;
            Ok(RangoFechas::new(inicio, fin))
        }
        _ => Err(CliError::command("Indique fecha de inicio y fecha de fin")),
    }
}

fn parse_formato(arg: Option<&String>) -> Result<FormatoArchivo, CliError> {
    let arg = arg.ok_or_else(|| CliError::command("Indique el formato: pdf o excel"))?;
    FormatoArchivo::from_str(arg).map_err(|_| CliError::command(format!("Formato inválido: {}", arg)))
}

fn formato_label(formato: FormatoArchivo) -> &'static str {
    match formato {
        FormatoArchivo::Pdf => "PDF",
        FormatoArchivo::Excel => "Excel",
    }
}

// =============================================================================
// Table configurations
// =============================================================================

fn empty_config() -> TableConfig {
    TableConfig::new("Reportes")
        .no_data_message("Genere un reporte: general, cuenta ID o cliente ID")
}

fn report_table(title: String, placeholder: &str) -> TableConfig {
    TableConfig::new(title)
        .search(&[], placeholder)
        .pageable(10)
        .page_size_options(&PAGE_SIZE_OPTIONS)
}

pub(crate) fn general_config() -> TableConfig {
    report_table("Reporte General de Cuentas".to_string(), "Buscar en cuentas...")
        .column(Column::new("numeroCuenta", "Número Cuenta"))
        .column(Column::new("tipoCuenta", "Tipo"))
        .column(Column::new("nombreCliente", "Cliente"))
        .column(Column::new("saldoInicial", "Saldo Inicial").currency("USD"))
        .column(Column::new("saldoActual", "Saldo Actual").currency("USD"))
        .column(Column::new("estado", "Estado").badge(BadgeConfig::new("Activa", "Inactiva")))
        .column(Column::new("cantidadMovimientos", "Movimientos"))
        .column(Column::new("fechaCreacion", "Fecha Creación").date())
}

pub(crate) fn cuenta_config(numero_cuenta: &str) -> TableConfig {
    report_table(format!("Movimientos - Cuenta {}", numero_cuenta), SEARCH_PLACEHOLDER)
        .column(Column::new("id", "ID"))
        .column(Column::new("fechaMovimiento", "Fecha").date())
        .column(Column::new("tipo", "Tipo"))
        .column(Column::new("valor", "Valor").currency("USD"))
        .column(Column::new("saldoAnterior", "Saldo Anterior").currency("USD"))
        .column(Column::new("saldoNuevo", "Saldo Actual").currency("USD"))
}

pub(crate) fn cliente_config(nombre_cliente: &str) -> TableConfig {
    report_table(format!("Movimientos del Cliente: {}", nombre_cliente), SEARCH_PLACEHOLDER)
        .column(Column::new("id", "#"))
        .column(Column::new("numeroCuenta", "Cuenta"))
        .column(Column::new("tipoCuenta", "Tipo Cuenta"))
        .column(Column::new("fechaMovimiento", "Fecha").date())
        .column(Column::new("tipo", "Tipo Movimiento"))
        .column(Column::new("valor", "Valor").currency("USD"))
        .column(Column::new("saldoAnterior", "Saldo Anterior").currency("USD"))
        .column(Column::new("saldoNuevo", "Saldo Actual").currency("USD"))
}

#[cfg(test)]
mod tests {
    use banca_lib::model::TipoMovimiento;
    use rust_decimal::Decimal;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    fn movimiento(id: i64, tipo: TipoMovimiento, valor: i64) -> ReporteMovimiento {
        ReporteMovimiento {
            id: Some(id),
            tipo,
            valor: Decimal::from(valor),
            saldo_anterior: Decimal::from(1000),
            saldo_nuevo: Decimal::from(1000 + valor),
            fecha_movimiento: date(2026, 2, 10).and_hms_opt(9, 30, 0),
        }
    }

    #[test]
    fn test_default_range_is_current_month() {
        let rango = parse_rango(&[], date(2026, 10, 16)).unwrap();
        assert_eq!(rango, RangoFechas::new(date(2026, 10, 1), date(2026, 10, 16)));
    }

    #[test]
    fn test_explicit_range() {
        let rango = parse_rango(&args("31/01/2026 2026-01-01"), date(2026, 10, 16)).unwrap();
        assert_eq!(rango.fecha_inicio, date(2026, 1, 1));
        assert_eq!(rango.fecha_fin, date(2026, 1, 31));

        assert!(parse_rango(&args("01/01/2026"), date(2026, 10, 16)).is_err());
        assert!(parse_rango(&args("ayer hoy"), date(2026, 10, 16)).is_err());
    }

    #[test]
    fn test_formato() {
        assert_eq!(parse_formato(Some(&"PDF".to_string())).unwrap(), FormatoArchivo::Pdf);
        assert_eq!(parse_formato(Some(&"excel".to_string())).unwrap(), FormatoArchivo::Excel);
        assert!(parse_formato(Some(&"csv".to_string())).is_err());
        assert!(parse_formato(None).is_err());
    }

    #[test]
    fn test_movement_balance_column() {
        let table = TableEngine::new(
            cuenta_config("478758"),
            vec![ReporteFila::Movimiento(movimiento(1, TipoMovimiento::Retiro, -575))],
        );
        let saldo = table.config().columns.last().unwrap().clone();
        assert_eq!(saldo.label, "Saldo Actual");
        assert_eq!(table.cell_text(0, &saldo), "$425.00");
        assert_eq!(table.config().title, "Movimientos - Cuenta 478758");
    }

    #[test]
    fn test_flattened_rows_search_by_account() {
        let rows = vec![
            ReporteFila::MovimientoCliente(MovimientoDeCuenta {
                movimiento: movimiento(1, TipoMovimiento::Deposito, 600),
                numero_cuenta: "225487".to_string(),
                tipo_cuenta: "CORRIENTE".to_string(),
                estado_cuenta: true,
            }),
            ReporteFila::MovimientoCliente(MovimientoDeCuenta {
                movimiento: movimiento(2, TipoMovimiento::Retiro, -540),
                numero_cuenta: "496825".to_string(),
                tipo_cuenta: "AHORRO".to_string(),
                estado_cuenta: true,
            }),
        ];
        let mut table = TableEngine::new(cliente_config("Marianela Montalvo"), rows);

        table.set_search_term("4968");
        assert_eq!(table.filtered_len(), 1);
        let cuenta = table.config().find_column("numeroCuenta").unwrap().clone();
        assert_eq!(table.cell_text(0, &cuenta), "496825");
    }
}
