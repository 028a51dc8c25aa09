//! Account management.

use std::str::FromStr;

use async_trait::async_trait;
use banca_lib::BancaClient;
use banca_lib::model::ClienteActivacionRequest;
use banca_lib::model::Cuenta;
use banca_table::Action;
use banca_table::ActionKind;
use banca_table::BadgeConfig;
use banca_table::Column;
use banca_table::TableConfig;
use banca_table::TableEngine;
use banca_table::TableEvent;
use banca_table::format;
use rust_decimal::Decimal;
use serde_json::Value;

use super::PAGE_SIZE_OPTIONS;
use super::TableControl;
use super::View;
use super::form_unavailable;
use super::parse_id;
use super::require_id;
use super::unknown_command;
use crate::error::CliError;

const HELP: &[&str] = &[
    "cliente ID                  cuentas de un cliente",
    "todas                       todas las cuentas",
    "depositar NUMERO MONTO      depósito en una cuenta",
    "retirar NUMERO MONTO        retiro de una cuenta",
];

pub struct CuentasView {
    table: TableEngine<Cuenta>,
    cliente_id: Option<i64>,
}

impl CuentasView {
    pub fn new() -> Self {
        Self {
            table: TableEngine::new(table_config(), Vec::new()),
            cliente_id: None,
        }
    }

    pub fn engine(&self) -> &TableEngine<Cuenta> {
        &self.table
    }

    /// Deactivates an active account. An inactive account is activated
    /// directly, or together with its owner when the owner is inactive too.
    async fn toggle(&self, client: &BancaClient, cuenta: &Cuenta) -> Result<String, CliError> {
        let id = require_id(cuenta.id, "cuenta")?;

        if cuenta.estado {
            client.cuentas().deactivate(id).await?;
            log::info!("Deactivated cuenta {}", id);
            return Ok(format!("Cuenta {} desactivada", cuenta.numero_cuenta));
        }

        let cliente_activo = match client.clientes().get(cuenta.cliente_id).await {
            Ok(cliente) => cliente.estado,
            Err(e) => {
                log::warn!(
                    "Could not fetch cliente {} for cuenta {}: {}",
                    cuenta.cliente_id,
                    id,
                    e.message()
                );
                true
            }
        };

        if cliente_activo {
            client.cuentas().activate(id).await?;
            log::info!("Activated cuenta {}", id);
            Ok(format!("Cuenta {} activada", cuenta.numero_cuenta))
        } else {
            client
                .clientes()
                .activate_with_cuentas(
                    cuenta.cliente_id,
                    &ClienteActivacionRequest {
                        cuentas_ids: vec![id],
                    },
                )
                .await?;
            log::info!("Activated cuenta {} with cliente {}", id, cuenta.cliente_id);
            Ok(format!(
                "Cuenta {} y su cliente {} activados",
                cuenta.numero_cuenta,
                cuenta.nombre_cliente.as_deref().unwrap_or("")
            ))
        }
    }

    async fn movimiento(
        &mut self,
        client: &BancaClient,
        args: &[String],
        deposito: bool,
    ) -> Result<Vec<String>, CliError> {
        let (Some(numero), Some(monto)) = (args.get(1), args.get(2)) else {
            return Err(CliError::command(format!("Uso: {} NUMERO MONTO", args[0])));
        };
        let monto = Decimal::from_str(monto)
            .ok()
            .filter(|m| m.is_sign_positive() && !m.is_zero())
            .ok_or_else(|| CliError::command(format!("Monto inválido: {}", monto)))?;

        let cuenta = if deposito {
            client.cuentas().deposit(numero, monto).await?
        } else {
            client.cuentas().withdraw(numero, monto).await?
        };

        self.load(client).await?;
        Ok(vec![format!(
            "Cuenta {}: nuevo saldo {}",
            cuenta.numero_cuenta,
            saldo(cuenta.saldo_actual)
        )])
    }

    async fn fetch(&self, client: &BancaClient) -> Result<Vec<Cuenta>, CliError> {
        let rows = match self.cliente_id {
            Some(id) => client.cuentas().list_by_cliente(id).await?,
            None => client.cuentas().list().await?,
        };
        log::debug!("Loaded {} cuentas", rows.len());
        Ok(rows)
    }

    /// Show one customer's accounts, or all of them, back on page 1.
    async fn filtrar(&mut self, client: &BancaClient, cliente_id: Option<i64>) -> Result<(), CliError> {
        self.cliente_id = cliente_id;
        let rows = self.fetch(client).await?;
        self.table.set_rows(rows);
        Ok(())
    }
}

impl Default for CuentasView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for CuentasView {
    fn name(&self) -> &'static str {
        "cuentas"
    }

    fn table(&self) -> &dyn TableControl {
        &self.table
    }

    fn table_mut(&mut self) -> &mut dyn TableControl {
        &mut self.table
    }

    async fn load(&mut self, client: &BancaClient) -> Result<(), CliError> {
        let rows = self.fetch(client).await?;
        self.table.refresh_rows(rows);
        Ok(())
    }

    async fn process_events(&mut self, client: &BancaClient) -> Result<Vec<String>, CliError> {
        let mut messages = Vec::new();
        let mut changed = false;

        for event in self.table.drain_events() {
            match event {
                TableEvent::CreateRequested => messages.push(form_unavailable("nueva cuenta")),
                TableEvent::ActionRequested { action, row } => match action.as_str() {
                    "view" => messages.extend(detail(&row)),
                    "toggle" => {
                        messages.push(self.toggle(client, &row).await?);
                        changed = true;
                    }
                    other => log::warn!("Unhandled cuenta action: {}", other),
                },
            }
        }

        if changed {
            self.load(client).await?;
        }
        Ok(messages)
    }

    async fn command(&mut self, client: &BancaClient, args: &[String]) -> Result<Vec<String>, CliError> {
        match args.first().map(String::as_str) {
            Some("cliente") => {
                let cliente_id = parse_id(args.get(1), "cliente")?;
                self.filtrar(client, Some(cliente_id)).await?;
                Ok(Vec::new())
            }
            Some("todas") => {
                self.filtrar(client, None).await?;
                Ok(Vec::new())
            }
            Some("depositar") => self.movimiento(client, args, true).await,
            Some("retirar") => self.movimiento(client, args, false).await,
            _ => Err(unknown_command(args)),
        }
    }

    fn help(&self) -> &'static [&'static str] {
        HELP
    }
}

fn detail(cuenta: &Cuenta) -> Vec<String> {
    vec![
        format!("Cuenta {}", cuenta.numero_cuenta),
        format!("  Número:  {}", cuenta.numero_cuenta),
        format!("  Tipo:    {}", cuenta.tipo_cuenta),
        format!("  Saldo:   {}", saldo(cuenta.saldo_actual)),
        format!(
            "  Cliente: {}",
            cuenta.nombre_cliente.as_deref().unwrap_or("N/A")
        ),
        format!(
            "  Estado:  {}",
            if cuenta.estado { "Activa" } else { "Inactiva" }
        ),
    ]
}

/// A balance rendered like the table's balance column.
fn saldo(monto: Decimal) -> String {
    format::format_value(Some(&Value::String(monto.to_string())), &saldo_column())
}

fn saldo_column() -> Column {
    Column::new("saldoActual", "Saldo").currency("USD")
}

pub(crate) fn table_config() -> TableConfig {
    TableConfig::new("Gestión de Cuentas")
        .column(Column::new("id", "ID"))
        .column(Column::new("numeroCuenta", "Número de Cuenta"))
        .column(Column::new("tipoCuenta", "Tipo"))
        .column(saldo_column())
        .column(Column::new("nombreCliente", "Cliente"))
        .column(Column::new("estado", "Estado").badge(BadgeConfig::new("Activa", "Inactiva")))
        .action(Action::new("Ver", ActionKind::View).class("btn-view"))
        .action(Action::new("Activar/Desactivar", ActionKind::Toggle).class("btn-toggle"))
        .search(
            &["numeroCuenta", "nombreCliente", "tipoCuenta"],
            "Buscar por número de cuenta, cliente o tipo...",
        )
        .pageable(10)
        .page_size_options(&PAGE_SIZE_OPTIONS)
        .create_button("Nueva Cuenta")
}
