//! REST resource operations
//!
//! Each resource family is reached through a borrowed handle on the client:
//!
//! ```no_run
//! # async fn run(client: banca_lib::BancaClient) -> Result<(), banca_lib::error::ApiError> {
//! let cuentas = client.cuentas().list_by_cliente(1).await?;
//! client.cuentas().deactivate(cuentas[0].id.unwrap_or_default()).await?;
//! # Ok(())
//! # }
//! ```

mod clientes;
mod cuentas;
mod movimientos;
mod reportes;

pub use clientes::*;
pub use cuentas::*;
pub use movimientos::*;
pub use reportes::*;

/// Encodes a free-form value for use as a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}
