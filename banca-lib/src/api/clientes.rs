//! Customer operations (`/clientes`)

use reqwest::Method;
use serde_json::json;

use super::segment;
use crate::BancaClient;
use crate::error::ApiError;
use crate::model::Cliente;
use crate::model::ClienteActivacionRequest;
use crate::model::ClienteActivacionValidacion;
use crate::model::ClienteRequest;

const RESOURCE: &str = "clientes";

/// Customer operations, see [`BancaClient::clientes`].
#[derive(Debug, Clone, Copy)]
pub struct Clientes<'a> {
    client: &'a BancaClient,
}

impl BancaClient {
    /// Customer operations.
    pub fn clientes(&self) -> Clientes<'_> {
        Clientes { client: self }
    }
}

impl Clientes<'_> {
    pub async fn create(&self, request: &ClienteRequest) -> Result<Cliente, ApiError> {
        let req = self.client.request(Method::POST, RESOURCE).json(request);
        self.client.send_json(req).await
    }

    pub async fn get(&self, id: i64) -> Result<Cliente, ApiError> {
        let req = self.client.request(Method::GET, &format!("{}/{}", RESOURCE, id));
        self.client.send_json(req).await
    }

    /// Looks a customer up by identity document.
    pub async fn get_by_documento(&self, documento: &str) -> Result<Cliente, ApiError> {
        let path = format!("{}/documento/{}", RESOURCE, segment(documento));
        let req = self.client.request(Method::GET, &path);
        self.client.send_json(req).await
    }

    pub async fn list(&self) -> Result<Vec<Cliente>, ApiError> {
        let req = self.client.request(Method::GET, RESOURCE);
        self.client.send_json(req).await
    }

    /// Lists active customers only.
    pub async fn list_activos(&self) -> Result<Vec<Cliente>, ApiError> {
        let req = self.client.request(Method::GET, &format!("{}/activos", RESOURCE));
        self.client.send_json(req).await
    }

    pub async fn update(&self, id: i64, request: &ClienteRequest) -> Result<Cliente, ApiError> {
        let req = self
            .client
            .request(Method::PUT, &format!("{}/{}", RESOURCE, id))
            .json(request);
        self.client.send_json(req).await
    }

    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.patch(id, "desactivar").await
    }

    pub async fn activate(&self, id: i64) -> Result<(), ApiError> {
        self.patch(id, "activar").await
    }

    /// Checks whether a customer can be reactivated and which of their
    /// accounts could be reactivated with them.
    pub async fn validate_activation(&self, id: i64) -> Result<ClienteActivacionValidacion, ApiError> {
        let path = format!("{}/{}/validar-activacion", RESOURCE, id);
        let req = self.client.request(Method::GET, &path);
        self.client.send_json(req).await
    }

    /// Activates a customer together with the given accounts.
    pub async fn activate_with_cuentas(
        &self,
        id: i64,
        request: &ClienteActivacionRequest,
    ) -> Result<(), ApiError> {
        let path = format!("{}/{}/activar-con-cuentas", RESOURCE, id);
        let req = self.client.request(Method::PATCH, &path).json(request);
        self.client.send_empty(req).await
    }

    async fn patch(&self, id: i64, action: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}/{}", RESOURCE, id, action);
        let req = self.client.request(Method::PATCH, &path).json(&json!({}));
        self.client.send_empty(req).await
    }
}
