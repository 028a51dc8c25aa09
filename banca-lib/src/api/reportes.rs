//! Report operations (`/reportes`)
//!
//! Three report kinds exist, each available as JSON, as a downloadable
//! PDF/Excel file, and by email. Dates are sent as `dd/MM/yyyy`.

use reqwest::Method;

use crate::BancaClient;
use crate::client::ErrorFallback;
use crate::error::ApiError;
use crate::model::Archivo;
use crate::model::EnvioReporte;
use crate::model::FormatoArchivo;
use crate::model::RangoFechas;
use crate::model::ReporteCuentas;
use crate::model::ReporteMovimientoCliente;
use crate::model::ReporteMovimientosCuenta;

const RESOURCE: &str = "reportes";

/// What a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlcanceReporte {
    /// Movements of every account of one customer.
    Cliente(i64),
    /// Movements of one account.
    Cuenta(i64),
    /// Summary of every account.
    General,
}

impl AlcanceReporte {
    fn path(&self) -> String {
        match self {
            AlcanceReporte::Cliente(id) => format!("{}/movimientos/cliente/{}", RESOURCE, id),
            AlcanceReporte::Cuenta(id) => format!("{}/movimientos/cuenta/{}", RESOURCE, id),
            AlcanceReporte::General => format!("{}/cuentas", RESOURCE),
        }
    }
}

/// Report operations, see [`BancaClient::reportes`].
#[derive(Debug, Clone, Copy)]
pub struct Reportes<'a> {
    client: &'a BancaClient,
}

impl BancaClient {
    /// Report operations.
    pub fn reportes(&self) -> Reportes<'_> {
        Reportes { client: self }
    }
}

impl Reportes<'_> {
    pub async fn cliente(
        &self,
        cliente_id: i64,
        rango: &RangoFechas,
    ) -> Result<ReporteMovimientoCliente, ApiError> {
        self.json(AlcanceReporte::Cliente(cliente_id), rango).await
    }

    pub async fn cuenta(
        &self,
        cuenta_id: i64,
        rango: &RangoFechas,
    ) -> Result<ReporteMovimientosCuenta, ApiError> {
        self.json(AlcanceReporte::Cuenta(cuenta_id), rango).await
    }

    pub async fn general(&self, rango: &RangoFechas) -> Result<ReporteCuentas, ApiError> {
        self.json(AlcanceReporte::General, rango).await
    }

    /// Downloads a report file. Use [`Archivo::save_to`] to write it out.
    pub async fn download(
        &self,
        alcance: AlcanceReporte,
        rango: &RangoFechas,
        formato: FormatoArchivo,
    ) -> Result<Archivo, ApiError> {
        let path = format!("{}/{}", alcance.path(), formato.path_segment());
        let req = self
            .client
            .request(Method::GET, &path)
            .query(&rango.report_params());
        self.client.send_json_with(req, ErrorFallback::Text).await
    }

    /// Mails a report, returning the server's confirmation text.
    pub async fn send(
        &self,
        alcance: AlcanceReporte,
        rango: &RangoFechas,
        envio: &EnvioReporte,
    ) -> Result<String, ApiError> {
        let path = format!("{}/enviar", alcance.path());
        let req = self
            .client
            .request(Method::POST, &path)
            .query(&rango.report_params())
            .query(&envio.params());
        self.client.send_text(req, ErrorFallback::Text).await
    }

    async fn json<T: serde::de::DeserializeOwned>(
        &self,
        alcance: AlcanceReporte,
        rango: &RangoFechas,
    ) -> Result<T, ApiError> {
        let req = self
            .client
            .request(Method::GET, &alcance.path())
            .query(&rango.report_params());
        self.client.send_json_with(req, ErrorFallback::Text).await
    }
}
