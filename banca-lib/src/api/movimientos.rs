//! Movement operations (`/movimientos`)

use reqwest::Method;

use crate::BancaClient;
use crate::error::ApiError;
use crate::model::Movimiento;
use crate::model::MovimientoRequest;
use crate::model::RangoFechas;

const RESOURCE: &str = "movimientos";

/// Movement operations, see [`BancaClient::movimientos`].
#[derive(Debug, Clone, Copy)]
pub struct Movimientos<'a> {
    client: &'a BancaClient,
}

impl BancaClient {
    /// Movement operations.
    pub fn movimientos(&self) -> Movimientos<'_> {
        Movimientos { client: self }
    }
}

impl Movimientos<'_> {
    /// Registers a movement, returning it with the resulting balances.
    pub async fn register(&self, request: &MovimientoRequest) -> Result<Movimiento, ApiError> {
        let req = self.client.request(Method::POST, RESOURCE).json(request);
        self.client.send_json(req).await
    }

    pub async fn get(&self, id: i64) -> Result<Movimiento, ApiError> {
        let req = self.client.request(Method::GET, &format!("{}/{}", RESOURCE, id));
        self.client.send_json(req).await
    }

    pub async fn list(&self) -> Result<Vec<Movimiento>, ApiError> {
        let req = self.client.request(Method::GET, RESOURCE);
        self.client.send_json(req).await
    }

    pub async fn list_by_cuenta(&self, cuenta_id: i64) -> Result<Vec<Movimiento>, ApiError> {
        self.list_path(&format!("{}/cuenta/{}", RESOURCE, cuenta_id), None).await
    }

    pub async fn list_by_cliente(&self, cliente_id: i64) -> Result<Vec<Movimiento>, ApiError> {
        self.list_path(&format!("{}/cliente/{}", RESOURCE, cliente_id), None).await
    }

    /// Movements of an account within `rango`.
    pub async fn list_by_cuenta_rango(
        &self,
        cuenta_id: i64,
        rango: &RangoFechas,
    ) -> Result<Vec<Movimiento>, ApiError> {
        let path = format!("{}/cuenta/{}/rango", RESOURCE, cuenta_id);
        self.list_path(&path, Some(rango)).await
    }

    /// Movements of every account of a customer within `rango`.
    pub async fn list_by_cliente_rango(
        &self,
        cliente_id: i64,
        rango: &RangoFechas,
    ) -> Result<Vec<Movimiento>, ApiError> {
        let path = format!("{}/cliente/{}/rango", RESOURCE, cliente_id);
        self.list_path(&path, Some(rango)).await
    }

    async fn list_path(&self, path: &str, rango: Option<&RangoFechas>) -> Result<Vec<Movimiento>, ApiError> {
        let mut req = self.client.request(Method::GET, path);
        if let Some(rango) = rango {
            // range endpoints take ISO dates, unlike reports
            req = req.query(&rango.iso_params());
        }
        self.client.send_json(req).await
    }
}
