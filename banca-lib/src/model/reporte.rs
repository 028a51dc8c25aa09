//! Report payloads and delivery options

use std::fmt;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::TipoMovimiento;

// =============================================================================
// Report bodies
// =============================================================================

/// One movement inside a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporteMovimiento {
    #[serde(default, alias = "movimientoId")]
    pub id: Option<i64>,
    pub tipo: TipoMovimiento,
    pub valor: Decimal,
    pub saldo_anterior: Decimal,
    pub saldo_nuevo: Decimal,
    #[serde(default)]
    pub fecha_movimiento: Option<NaiveDateTime>,
}

/// An account and its movements inside a customer report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuentaConMovimientos {
    pub cuenta_id: i64,
    pub numero_cuenta: String,
    pub tipo_cuenta: String,
    pub estado: bool,
    #[serde(default)]
    pub movimientos: Vec<ReporteMovimiento>,
}

/// Movements of every account of a customer within a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporteMovimientoCliente {
    pub cliente_id: i64,
    pub nombre_cliente: String,
    #[serde(default)]
    pub documento_identidad: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub total_movimientos: u64,
    #[serde(default)]
    pub cuentas: Vec<CuentaConMovimientos>,
}

/// A customer-report movement tagged with the account it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovimientoDeCuenta {
    #[serde(flatten)]
    pub movimiento: ReporteMovimiento,
    pub numero_cuenta: String,
    pub tipo_cuenta: String,
    pub estado_cuenta: bool,
}

impl ReporteMovimientoCliente {
    /// Every movement of every account, in report order, each carrying its
    /// account's number, type and state.
    pub fn movimientos(&self) -> Vec<MovimientoDeCuenta> {
        self.cuentas
            .iter()
            .flat_map(|cuenta| {
                cuenta.movimientos.iter().map(|movimiento| MovimientoDeCuenta {
                    movimiento: movimiento.clone(),
                    numero_cuenta: cuenta.numero_cuenta.clone(),
                    tipo_cuenta: cuenta.tipo_cuenta.clone(),
                    estado_cuenta: cuenta.estado,
                })
            })
            .collect()
    }
}

/// Movements of one account within a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporteMovimientosCuenta {
    pub cuenta_id: i64,
    pub numero_cuenta: String,
    pub tipo_cuenta: String,
    pub nombre_cliente: String,
    #[serde(default)]
    pub saldo_inicial: Option<Decimal>,
    pub saldo_actual: Decimal,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub total_movimientos: u64,
    #[serde(default)]
    pub movimientos: Vec<ReporteMovimiento>,
}

/// Summary line for one account in the general report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuentaResumen {
    pub cuenta_id: i64,
    pub numero_cuenta: String,
    pub tipo_cuenta: String,
    pub nombre_cliente: String,
    #[serde(default)]
    pub saldo_inicial: Option<Decimal>,
    pub saldo_actual: Decimal,
    pub estado: bool,
    pub cantidad_movimientos: u64,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
}

/// General report over every account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporteCuentas {
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub total_cuentas: u64,
    #[serde(default)]
    pub cuentas: Vec<CuentaResumen>,
}

// =============================================================================
// Delivery
// =============================================================================

/// File format for downloaded or mailed reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormatoArchivo {
    Pdf,
    Excel,
}

impl FormatoArchivo {
    /// Value of the `formato` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatoArchivo::Pdf => "PDF",
            FormatoArchivo::Excel => "EXCEL",
        }
    }

    /// Path segment of the download endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            FormatoArchivo::Pdf => "pdf",
            FormatoArchivo::Excel => "excel",
        }
    }
}

impl fmt::Display for FormatoArchivo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormatoArchivo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(FormatoArchivo::Pdf),
            "excel" | "xlsx" => Ok(FormatoArchivo::Excel),
            other => Err(format!("Unknown file format: {}", other)),
        }
    }
}

/// Options for mailing a report.
///
/// # Example
///
/// ```
/// use banca_lib::model::{EnvioReporte, FormatoArchivo};
///
/// let envio = EnvioReporte::new("ana@example.com", FormatoArchivo::Excel)
///     .asunto("Reporte de enero");
/// assert_eq!(envio.params().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvioReporte {
    pub email_destinatario: String,
    pub formato: FormatoArchivo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asunto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje_adicional: Option<String>,
}

impl EnvioReporte {
    pub fn new(email: impl Into<String>, formato: FormatoArchivo) -> Self {
        Self {
            email_destinatario: email.into(),
            formato,
            asunto: None,
            mensaje_adicional: None,
        }
    }

    pub fn asunto(mut self, asunto: impl Into<String>) -> Self {
        self.asunto = Some(asunto.into());
        self
    }

    pub fn mensaje_adicional(mut self, mensaje: impl Into<String>) -> Self {
        self.mensaje_adicional = Some(mensaje.into());
        self
    }

    /// Query parameters; empty optional fields are left out.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("emailDestinatario", self.email_destinatario.clone()),
            ("formato", self.formato.as_str().to_string()),
        ];
        if let Some(asunto) = self.asunto.as_ref().filter(|s| !s.is_empty()) {
            params.push(("asunto", asunto.clone()));
        }
        if let Some(mensaje) = self.mensaje_adicional.as_ref().filter(|s| !s.is_empty()) {
            params.push(("mensajeAdicional", mensaje.clone()));
        }
        params
    }
}
