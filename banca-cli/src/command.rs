//! Console command parsing.

use std::str::FromStr;

use crate::error::CliError;

pub const USAGE: &[&str] = &[
    "/texto              buscar (\"/\" sola limpia la búsqueda)",
    "p N                 ir a la página N",
    "n | b               página siguiente | anterior",
    "t N                 filas por página (5, 10, 25 o 50)",
    "a FILA ACCION       acción sobre una fila de la página (p.ej. a 2 toggle)",
    "c                   crear",
    "r                   recargar",
    "v VISTA             cambiar de vista (clientes, cuentas, movimientos, reportes)",
    "h                   ayuda",
    "q                   salir",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Page(usize),
    Next,
    Previous,
    PageSize(usize),
    /// `row` is the 0-based index into the displayed rows.
    Action { row: usize, action: String },
    Create,
    Reload,
    Switch(String),
    Help,
    Quit,
    /// Anything else, handed to the active view word by word.
    View(Vec<String>),
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if let Some(term) = line.strip_prefix('/') {
            return Ok(Command::Search(term.trim().to_string()));
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, rest)) = words.split_first() else {
            return Err(CliError::command("Comando vacío"));
        };

        let command = match (head, rest) {
            ("p", [page]) => Command::Page(number(page, "Página")?),
            ("n", []) => Command::Next,
            ("b", []) => Command::Previous,
            ("t", [size]) => match number(size, "Tamaño de página")? {
                0 => return Err(CliError::command("El tamaño de página debe ser mayor que 0")),
                size => Command::PageSize(size),
            },
            ("a", [row, action]) => match number(row, "Fila")? {
                0 => return Err(CliError::command("Las filas empiezan en 1")),
                row => Command::Action {
                    row: row - 1,
                    action: action.to_string(),
                },
            },
            ("c", []) => Command::Create,
            ("r", []) => Command::Reload,
            ("v", [name]) => Command::Switch(name.to_lowercase()),
            ("h" | "?", []) => Command::Help,
            ("q", []) => Command::Quit,
            ("p" | "t" | "a" | "v", _) => {
                return Err(CliError::command(format!("Argumentos inválidos para '{}'", head)));
            }
            _ => Command::View(words.iter().map(|w| w.to_string()).collect()),
        };
        Ok(command)
    }
}

fn number(arg: &str, what: &str) -> Result<usize, CliError> {
    arg.parse()
        .map_err(|_| CliError::command(format!("{} inválida: {}", what, arg)))
}
