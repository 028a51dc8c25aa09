//! Customer management.

use async_trait::async_trait;
use banca_lib::BancaClient;
use banca_lib::model::Cliente;
use banca_lib::model::ClienteActivacionRequest;
use banca_table::Action;
use banca_table::ActionKind;
use banca_table::BadgeConfig;
use banca_table::Column;
use banca_table::TableConfig;
use banca_table::TableEngine;
use banca_table::TableEvent;

use super::PAGE_SIZE_OPTIONS;
use super::TableControl;
use super::View;
use super::form_unavailable;
use super::parse_id;
use super::require_id;
use super::unknown_command;
use crate::error::CliError;

const HELP: &[&str] = &[
    "activos                     solo clientes activos",
    "todos                       todos los clientes",
    "documento DOC               buscar un cliente por documento",
    "activar ID [CUENTA...]      activar un cliente con las cuentas indicadas",
];

pub struct ClientesView {
    table: TableEngine<Cliente>,
    solo_activos: bool,
}

impl ClientesView {
    pub fn new() -> Self {
        Self {
            table: TableEngine::new(table_config(), Vec::new()),
            solo_activos: false,
        }
    }

    pub fn engine(&self) -> &TableEngine<Cliente> {
        &self.table
    }

    /// Deactivates an active customer, or reactivates an inactive one
    /// together with every account that can come back with it.
    async fn toggle(&self, client: &BancaClient, cliente: &Cliente) -> Result<String, CliError> {
        let id = require_id(cliente.id, "cliente")?;
        let clientes = client.clientes();

        if cliente.estado {
            clientes.deactivate(id).await?;
            log::info!("Deactivated cliente {}", id);
            return Ok(format!(
                "Cliente {} desactivado junto con sus cuentas",
                cliente.nombre
            ));
        }

        let validacion = clientes.validate_activation(id).await?;
        let cuentas_ids: Vec<i64> = validacion.reactivables().map(|c| c.id).collect();

        if cuentas_ids.is_empty() {
            clientes.activate(id).await?;
            log::info!("Activated cliente {}", id);
            Ok(format!("Cliente {} activado", cliente.nombre))
        } else {
            let count = cuentas_ids.len();
            clientes
                .activate_with_cuentas(id, &ClienteActivacionRequest { cuentas_ids })
                .await?;
            log::info!("Activated cliente {} with {} cuenta(s)", id, count);
            Ok(format!(
                "Cliente {} activado con {} cuenta(s)",
                cliente.nombre, count
            ))
        }
    }

    async fn fetch(&self, client: &BancaClient) -> Result<Vec<Cliente>, CliError> {
        let rows = if self.solo_activos {
            client.clientes().list_activos().await?
        } else {
            client.clientes().list().await?
        };
        log::debug!("Loaded {} clientes", rows.len());
        Ok(rows)
    }

    /// Switch between active and all customers, back on page 1.
    async fn filtrar(&mut self, client: &BancaClient, solo_activos: bool) -> Result<(), CliError> {
        self.solo_activos = solo_activos;
        let rows = self.fetch(client).await?;
        self.table.set_rows(rows);
        Ok(())
    }

    async fn activar(&mut self, client: &BancaClient, args: &[String]) -> Result<Vec<String>, CliError> {
        let id = parse_id(args.get(1), "cliente")?;
        let cuentas_ids = args[2..]
            .iter()
            .map(|arg| parse_id(Some(arg), "cuenta"))
            .collect::<Result<Vec<_>, _>>()?;

        let message = if cuentas_ids.is_empty() {
            client.clientes().activate(id).await?;
            format!("Cliente {} activado", id)
        } else {
            let count = cuentas_ids.len();
            client
                .clientes()
                .activate_with_cuentas(id, &ClienteActivacionRequest { cuentas_ids })
                .await?;
            format!("Cliente {} activado con {} cuenta(s)", id, count)
        };

        self.load(client).await?;
        Ok(vec![message])
    }
}

impl Default for ClientesView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for ClientesView {
    fn name(&self) -> &'static str {
        "clientes"
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
                TableEvent::CreateRequested => messages.push(form_unavailable("nuevo cliente")),
                TableEvent::ActionRequested { action, row } => match action.as_str() {
                    "toggle" => {
                        messages.push(self.toggle(client, &row).await?);
                        changed = true;
                    }
                    "edit" => messages.push(form_unavailable(&format!(
                        "edición del cliente {}",
                        row.nombre
                    ))),
                    other => log::warn!("Unhandled cliente action: {}", other),
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
            Some("activos") => {
                self.filtrar(client, true).await?;
                Ok(vec![format!("{} cliente(s) activo(s)", self.table.rows().len())])
            }
            Some("todos") => {
                self.filtrar(client, false).await?;
                Ok(Vec::new())
            }
            Some("documento") => {
                let documento = args
                    .get(1)
                    .ok_or_else(|| CliError::command("Falta el documento"))?;
                let cliente = client.clientes().get_by_documento(documento).await?;
                Ok(detail(&cliente))
            }
            Some("activar") => self.activar(client, args).await,
            _ => Err(unknown_command(args)),
        }
    }

    fn help(&self) -> &'static [&'static str] {
        HELP
    }
}

fn detail(cliente: &Cliente) -> Vec<String> {
    vec![
        format!("Cliente {}", cliente.nombre),
        format!("  Documento: {}", cliente.identificacion),
        format!("  Género:    {}", cliente.genero),
        format!("  Edad:      {}", cliente.edad),
        format!("  Dirección: {}", cliente.direccion),
        format!(
            "  Teléfono:  {}",
            cliente.telefono.as_deref().unwrap_or("N/A")
        ),
        format!(
            "  Estado:    {}",
            if cliente.estado { "Activo" } else { "Inactivo" }
        ),
    ]
}

pub(crate) fn table_config() -> TableConfig {
    TableConfig::new("Gestión de Clientes")
        .column(Column::new("id", "ID"))
        .column(Column::new("nombre", "Nombre"))
        .column(Column::new("genero", "Género"))
        .column(Column::new("edad", "Edad"))
        .column(Column::new("identificacion", "Documento"))
        .column(Column::new("direccion", "Dirección"))
        .column(Column::new("telefono", "Teléfono"))
        .column(Column::new("estado", "Estado").badge(BadgeConfig::new("Activo", "Inactivo")))
        .action(Action::new("Editar", ActionKind::Edit).class("btn-edit"))
        .action(Action::new("Activar/Desactivar", ActionKind::Toggle).class("btn-toggle"))
        .search(
            &["nombre", "genero", "identificacion", "telefono"],
            "Buscar por nombre, género, documento o teléfono...",
        )
        .pageable(10)
        .page_size_options(&PAGE_SIZE_OPTIONS)
        .create_button("Nuevo Cliente")
}
