//! Data model types

mod archivo;
mod cliente;
mod cuenta;
mod fechas;
mod movimiento;
mod reporte;

pub use archivo::*;
pub use cliente::*;
pub use cuenta::*;
pub use fechas::*;
pub use movimiento::*;
pub use reporte::*;
