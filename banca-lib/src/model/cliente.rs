//! Customer records

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// A bank customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    #[serde(default)]
    pub id: Option<i64>,
    pub nombre: String,
    pub genero: String,
    pub edad: u32,
    pub identificacion: String,
    pub direccion: String,
    #[serde(default)]
    pub telefono: Option<String>,
    /// Whether the customer is active.
    #[serde(default)]
    pub estado: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Payload for creating or updating a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteRequest {
    pub nombre: String,
    pub genero: String,
    pub edad: u32,
    pub identificacion: String,
    pub direccion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    pub password: String,
}

/// Result of checking whether a customer can be reactivated, listing the
/// accounts that could be reactivated with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteActivacionValidacion {
    pub cliente_activo: bool,
    #[serde(default)]
    pub cuentas: Vec<CuentaActivacion>,
    #[serde(default)]
    pub mensaje: String,
}

impl ClienteActivacionValidacion {
    /// Accounts that are inactive but not deleted.
    pub fn reactivables(&self) -> impl Iterator<Item = &CuentaActivacion> {
        self.cuentas.iter().filter(|c| !c.estado && !c.deleted)
    }
}

/// An account as listed in an activation check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuentaActivacion {
    pub id: i64,
    pub numero_cuenta: String,
    pub tipo_cuenta: String,
    pub estado: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// Payload for activating a customer together with some of their accounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteActivacionRequest {
    pub cuentas_ids: Vec<i64>,
}
