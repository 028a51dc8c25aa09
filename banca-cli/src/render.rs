//! Plain-text rendering of a table.
//!
//! The renderer only reads from a [`TableControl`]; it never changes the
//! table. Row numbers printed in the first column are the 1-based positions
//! used by the `a FILA ACCION` command.

use banca_table::PageLink;

use crate::views::TableControl;

const COLUMN_GAP: &str = " | ";

/// Render the title, the current page of rows and the navigation footer.
pub fn render(table: &dyn TableControl) -> String {
    let config = table.config();
    let mut lines = vec![format!("== {} ==", config.title)];

    if config.searchable {
        if table.search_term().trim().is_empty() {
            lines.push(format!("Buscar (/texto): {}", config.search_placeholder));
        } else {
            lines.push(format!("Buscar: \"{}\"", table.search_term()));
        }
    }
    if config.show_create_button {
        lines.push(format!("[c] {}", config.create_button_label));
    }
    lines.push(String::new());

    if table.is_empty() {
        lines.push(config.no_data_message.clone());
        return lines.join("\n");
    }

    lines.extend(grid(table));
    lines.push(String::new());

    if !config.actions.is_empty() {
        let actions: Vec<String> = config
            .actions
            .iter()
            .map(|a| format!("{} ({})", a.tag(), a.label))
            .collect();
        lines.push(format!("Acciones: {}", actions.join(", ")));
    }
    lines.push(footer(table));

    lines.join("\n")
}

fn grid(table: &dyn TableControl) -> Vec<String> {
    let columns = &table.config().columns;

    let header: Vec<String> = std::iter::once("#".to_string())
        .chain(columns.iter().map(|c| c.label.clone()))
        .collect();
    let rows: Vec<Vec<String>> = (0..table.displayed_len())
        .map(|index| {
            std::iter::once((index + 1).to_string())
                .chain(columns.iter().map(|c| table.cell_text(index, c)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = vec![format_row(&header), separator];
    lines.extend(rows.iter().map(|row| format_row(row)));
    lines
}

fn footer(table: &dyn TableControl) -> String {
    if !table.config().pageable {
        return table.display_range();
    }
    format!(
        "{}   Página: {}   ({} por página)",
        table.display_range(),
        page_window(table),
        table.page_size()
    )
}

/// The page-number window with the current page bracketed, e.g.
/// `‹ 1 … 4 [5] 6 … 10 ›`. The arrows appear only when that direction
/// is available.
pub fn page_window(table: &dyn TableControl) -> String {
    let current = table.current_page();
    let mut parts = Vec::new();

    if table.has_previous() {
        parts.push("‹".to_string());
    }
    for link in table.page_numbers() {
        parts.push(match link {
            PageLink::Page(page) if page == current => format!("[{}]", page),
            other => other.to_string(),
        });
    }
    if table.has_next() {
        parts.push("›".to_string());
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use banca_table::Action;
    use banca_table::ActionKind;
    use banca_table::BadgeConfig;
    use banca_table::Column;
    use banca_table::TableConfig;
    use banca_table::TableEngine;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Fila {
        numero_cuenta: String,
        saldo_actual: f64,
        estado: bool,
    }

    fn table(n: usize) -> TableEngine<Fila> {
        let config = TableConfig::new("Gestión de Cuentas")
            .column(Column::new("numeroCuenta", "Número"))
            .column(Column::new("saldoActual", "Saldo").currency("USD"))
            .column(Column::new("estado", "Estado").badge(BadgeConfig::new("Activa", "Inactiva")))
            .action(Action::new("Ver", ActionKind::View))
            .search(&["numeroCuenta"], "Buscar cuentas...")
            .pageable(2)
            .create_button("Nueva Cuenta");
        let rows = (0..n)
            .map(|i| Fila {
                numero_cuenta: format!("47875{}", i),
                saldo_actual: 1000.0 * (i + 1) as f64,
                estado: i % 2 == 0,
            })
            .collect();
        TableEngine::new(config, rows)
    }

    #[test]
    fn test_render_page() {
        let mut table = table(3);
        table.set_page(2);
        let text = render(&table);

        assert!(text.starts_with("== Gestión de Cuentas =="));
        assert!(text.contains("[c] Nueva Cuenta"));
        assert!(text.contains("# | Número | Saldo     | Estado"));
        assert!(text.contains("1 | 478752 | $3,000.00 | Activa"));
        assert!(!text.contains("478750"));
        assert!(text.contains("Acciones: view (Ver)"));
        assert!(text.contains("3-3 de 3   Página: ‹ 1 [2]   (2 por página)"));
    }

    #[test]
    fn test_render_empty() {
        let mut table = table(3);
        table.set_search_term("zzz");
        let text = render(&table);

        assert!(text.contains("Buscar: \"zzz\""));
        assert!(text.ends_with("No hay datos registrados"));
    }

    #[test]
    fn test_page_window() {
        let mut table = table(20);
        table.set_page(5);
        assert_eq!(page_window(&table), "‹ 1 … 4 [5] 6 … 10 ›");

        table.set_page(1);
        assert_eq!(page_window(&table), "[1] 2 3 4 … 10 ›");
    }
}
