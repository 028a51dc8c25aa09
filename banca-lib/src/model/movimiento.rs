//! Account movements

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

/// Kind of account movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoMovimiento {
    Deposito,
    Retiro,
    Activar,
    Desactivar,
}

impl TipoMovimiento {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoMovimiento::Deposito => "DEPOSITO",
            TipoMovimiento::Retiro => "RETIRO",
            TipoMovimiento::Activar => "ACTIVAR",
            TipoMovimiento::Desactivar => "DESACTIVAR",
        }
    }

    /// Returns `true` for movements that carry an amount.
    pub fn moves_money(&self) -> bool {
        matches!(self, TipoMovimiento::Deposito | TipoMovimiento::Retiro)
    }
}

impl fmt::Display for TipoMovimiento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoMovimiento {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEPOSITO" => Ok(TipoMovimiento::Deposito),
            "RETIRO" => Ok(TipoMovimiento::Retiro),
            "ACTIVAR" => Ok(TipoMovimiento::Activar),
            "DESACTIVAR" => Ok(TipoMovimiento::Desactivar),
            other => Err(format!("Unknown movement type: {}", other)),
        }
    }
}

/// A movement on an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movimiento {
    #[serde(default)]
    pub id: Option<i64>,
    pub tipo: TipoMovimiento,
    pub valor: Decimal,
    pub saldo_anterior: Decimal,
    pub saldo_nuevo: Decimal,
    #[serde(default)]
    pub fecha_movimiento: Option<NaiveDateTime>,
    pub cuenta_id: i64,
    #[serde(default)]
    pub numero_cuenta: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
    #[serde(default)]
    pub nombre_cliente: Option<String>,
}

/// Payload for registering a movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovimientoRequest {
    pub cuenta_id: i64,
    pub tipo_movimiento: TipoMovimiento,
    /// Required for deposits and withdrawals, ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor: Option<Decimal>,
}

impl MovimientoRequest {
    pub fn deposito(cuenta_id: i64, valor: Decimal) -> Self {
        Self {
            cuenta_id,
            tipo_movimiento: TipoMovimiento::Deposito,
            valor: Some(valor),
        }
    }

    pub fn retiro(cuenta_id: i64, valor: Decimal) -> Self {
        Self {
            cuenta_id,
            tipo_movimiento: TipoMovimiento::Retiro,
            valor: Some(valor),
        }
    }
}
