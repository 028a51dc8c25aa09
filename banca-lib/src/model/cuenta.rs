//! Account records

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

/// Kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoCuenta {
    Ahorro,
    Corriente,
    Nomina,
}

impl TipoCuenta {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoCuenta::Ahorro => "AHORRO",
            TipoCuenta::Corriente => "CORRIENTE",
            TipoCuenta::Nomina => "NOMINA",
        }
    }
}

impl fmt::Display for TipoCuenta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoCuenta {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AHORRO" => Ok(TipoCuenta::Ahorro),
            "CORRIENTE" => Ok(TipoCuenta::Corriente),
            "NOMINA" => Ok(TipoCuenta::Nomina),
            other => Err(format!("Unknown account type: {}", other)),
        }
    }
}

/// A bank account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cuenta {
    #[serde(default)]
    pub id: Option<i64>,
    pub numero_cuenta: String,
    pub tipo_cuenta: TipoCuenta,
    #[serde(default)]
    pub saldo_inicial: Option<Decimal>,
    pub saldo_actual: Decimal,
    pub cliente_id: i64,
    #[serde(default)]
    pub nombre_cliente: Option<String>,
    /// Whether the account is active.
    #[serde(default)]
    pub estado: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Payload for opening an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuentaRequest {
    pub numero_cuenta: String,
    pub tipo_cuenta: TipoCuenta,
    pub cliente_id: i64,
}
