//! Interactive console loop.
//!
//! Reads one command per line, applies it to the active view and prints
//! any messages followed by the re-rendered table. Errors are printed and
//! the loop goes on; only end of input or `q` stops it.

use banca_lib::BancaClient;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;

use crate::command::Command;
use crate::command::USAGE;
use crate::error::CliError;
use crate::render::render;
use crate::views::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    client: BancaClient,
    views: Vec<Box<dyn View>>,
    active: usize,
}

impl Console {
    pub fn new(client: BancaClient, views: Vec<Box<dyn View>>) -> Self {
        Self {
            client,
            views,
            active: 0,
        }
    }

    /// Set the initial page size of every view.
    pub fn with_page_size(mut self, size: usize) -> Self {
        for view in &mut self.views {
            view.table_mut().set_page_size(size);
        }
        self
    }

    pub fn active(&self) -> &dyn View {
        self.views[self.active].as_ref()
    }

    /// Load the active view and render it.
    pub async fn start(&mut self) -> String {
        let view = &mut self.views[self.active];
        match view.load(&self.client).await {
            Ok(()) => render(view.table()),
            Err(e) => {
                log::error!("Failed to load {}: {}", view.name(), e);
                format!("Error: {}\n\n{}", e.message(), render(view.table()))
            }
        }
    }

    /// Parse and run one input line, returning what to print.
    pub async fn handle_line(&mut self, line: &str) -> (Flow, String) {
        let result = match line.parse::<Command>() {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };

        match result {
            Ok((Flow::Quit, _)) => (Flow::Quit, String::new()),
            Ok((Flow::Continue, messages)) => (Flow::Continue, self.screen(&messages)),
            Err(e) => {
                log::warn!("Command '{}' failed: {}", line.trim(), e);
                let messages = vec![format!("Error: {}", e.message())];
                (Flow::Continue, self.screen(&messages))
            }
        }
    }

    /// Apply one command to the active view.
    pub async fn execute(&mut self, command: Command) -> Result<(Flow, Vec<String>), CliError> {
        log::debug!("Executing {:?} on {}", command, self.views[self.active].name());
        let mut messages = Vec::new();

        match command {
            Command::Search(term) => self.views[self.active].table_mut().set_search_term(&term),
            Command::Page(page) => {
                if !self.views[self.active].table_mut().set_page(page) {
                    messages.push(format!("La página {} no existe", page));
                }
            }
            Command::Next => {
                if !self.views[self.active].table_mut().next_page() {
                    messages.push("Ya está en la última página".to_string());
                }
            }
            Command::Previous => {
                if !self.views[self.active].table_mut().previous_page() {
                    messages.push("Ya está en la primera página".to_string());
                }
            }
            Command::PageSize(size) => {
                let table = self.views[self.active].table_mut();
                let options = &table.config().page_size_options;
                if !options.is_empty() && !options.contains(&size) {
                    let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
                    return Err(CliError::command(format!(
                        "Tamaño de página no disponible: {} (opciones: {})",
                        size,
                        options.join(", ")
                    )));
                }
                table.set_page_size(size);
            }
            Command::Action { row, action } => {
                let view = &mut self.views[self.active];
                let config = view.table().config();
                if config.find_action(&action).is_none() {
                    let known: Vec<&str> = config.actions.iter().map(|a| a.tag()).collect();
                    return Err(CliError::command(if known.is_empty() {
                        "Esta vista no tiene acciones".to_string()
                    } else {
                        format!("Acción desconocida: {} (disponibles: {})", action, known.join(", "))
                    }));
                }
                if !view.table_mut().request_action(&action, row) {
                    return Err(CliError::command(format!(
                        "No hay fila {} en esta página",
                        row + 1
                    )));
                }
                messages = view.process_events(&self.client).await?;
            }
            Command::Create => {
                let view = &mut self.views[self.active];
                if !view.table().config().show_create_button {
                    return Err(CliError::command("Esta vista no permite crear registros"));
                }
                view.table_mut().request_create();
                messages = view.process_events(&self.client).await?;
            }
            Command::Reload => self.views[self.active].load(&self.client).await?,
            Command::Switch(name) => {
                let index = self
                    .views
                    .iter()
                    .position(|v| v.name().starts_with(name.as_str()))
                    .ok_or_else(|| CliError::command(format!("Vista desconocida: {}", name)))?;
                self.active = index;
                self.views[index].load(&self.client).await?;
            }
            Command::Help => {
                messages.extend(USAGE.iter().map(|line| line.to_string()));
                let extra = self.views[self.active].help();
                if !extra.is_empty() {
                    messages.push(format!("-- {} --", self.views[self.active].name()));
                    messages.extend(extra.iter().map(|line| line.to_string()));
                }
            }
            Command::Quit => return Ok((Flow::Quit, messages)),
            Command::View(args) => {
                messages = self.views[self.active].command(&self.client, &args).await?;
            }
        }

        Ok((Flow::Continue, messages))
    }

    /// Read commands from `input` until it ends or `q`, writing screens to
    /// `output`.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let screen = self.start().await;
        write_screen(&mut output, &screen).await?;

        loop {
            output
                .write_all(format!("{}> ", self.active().name()).as_bytes())
                .await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let (flow, screen) = self.handle_line(&line).await;
            if flow == Flow::Quit {
                break;
            }
            write_screen(&mut output, &screen).await?;
        }

        log::info!("Console closed");
        Ok(())
    }

    fn screen(&self, messages: &[String]) -> String {
        let table = render(self.views[self.active].table());
        if messages.is_empty() {
            table
        } else {
            format!("{}\n\n{}", messages.join("\n"), table)
        }
    }
}

async fn write_screen<W: AsyncWrite + Unpin>(output: &mut W, screen: &str) -> Result<(), CliError> {
    output.write_all(screen.as_bytes()).await?;
    output.write_all(b"\n\n").await?;
    Ok(())
}
