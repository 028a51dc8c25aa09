//! Account operations (`/cuentas`)

use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::json;

use super::segment;
use crate::BancaClient;
use crate::error::ApiError;
use crate::model::Cuenta;
use crate::model::CuentaRequest;

const RESOURCE: &str = "cuentas";

/// Account operations, see [`BancaClient::cuentas`].
#[derive(Debug, Clone, Copy)]
pub struct Cuentas<'a> {
    client: &'a BancaClient,
}

impl BancaClient {
    /// Account operations.
    pub fn cuentas(&self) -> Cuentas<'_> {
        Cuentas { client: self }
    }
}

impl Cuentas<'_> {
    pub async fn create(&self, request: &CuentaRequest) -> Result<Cuenta, ApiError> {
        let req = self.client.request(Method::POST, RESOURCE).json(request);
        self.client.send_json(req).await
    }

    pub async fn get(&self, id: i64) -> Result<Cuenta, ApiError> {
        let req = self.client.request(Method::GET, &format!("{}/{}", RESOURCE, id));
        self.client.send_json(req).await
    }

    pub async fn get_by_numero(&self, numero: &str) -> Result<Cuenta, ApiError> {
        let path = format!("{}/numero/{}", RESOURCE, segment(numero));
        let req = self.client.request(Method::GET, &path);
        self.client.send_json(req).await
    }

    pub async fn list(&self) -> Result<Vec<Cuenta>, ApiError> {
        let req = self.client.request(Method::GET, RESOURCE);
        self.client.send_json(req).await
    }

    pub async fn list_by_cliente(&self, cliente_id: i64) -> Result<Vec<Cuenta>, ApiError> {
        let path = format!("{}/cliente/{}", RESOURCE, cliente_id);
        let req = self.client.request(Method::GET, &path);
        self.client.send_json(req).await
    }

    /// Deposits `monto` into the account, returning the updated account.
    pub async fn deposit(&self, numero: &str, monto: Decimal) -> Result<Cuenta, ApiError> {
        self.move_money(numero, "depositar", monto).await
    }

    /// Withdraws `monto` from the account, returning the updated account.
    pub async fn withdraw(&self, numero: &str, monto: Decimal) -> Result<Cuenta, ApiError> {
        self.move_money(numero, "retirar", monto).await
    }

    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.patch(id, "desactivar").await
    }

    pub async fn activate(&self, id: i64) -> Result<(), ApiError> {
        self.patch(id, "activar").await
    }

    async fn move_money(&self, numero: &str, action: &str, monto: Decimal) -> Result<Cuenta, ApiError> {
        let path = format!("{}/{}/{}", RESOURCE, segment(numero), action);
        let req = self
            .client
            .request(Method::POST, &path)
            .query(&[("monto", monto.normalize().to_string())]);
        self.client.send_json(req).await
    }

    async fn patch(&self, id: i64, action: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}/{}", RESOURCE, id, action);
        let req = self.client.request(Method::PATCH, &path).json(&json!({}));
        self.client.send_empty(req).await
    }
}
