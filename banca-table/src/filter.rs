//! Case-insensitive substring search over configured fields.

use serde::Serialize;
use serde_json::Value;

use crate::config::TableConfig;
use crate::format::display_string;
use crate::path::resolve;

/// Normalize a search term: trimmed and lower-cased.
///
/// Returns `None` for empty or whitespace-only terms, which disable
/// filtering.
pub fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Returns `true` if any of `fields` resolves to a value whose lower-cased
/// string form contains `needle`.
///
/// `needle` must already be normalized with [`normalize_term`].
pub fn row_matches(row: &Value, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| {
        resolve(row, field)
            .map(|value| display_string(value).to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

/// Filter row projections, returning the indices of the rows that match.
///
/// Order is preserved. When the table is not searchable or the term is
/// blank every index is returned.
pub fn filter_indices(rows: &[Value], config: &TableConfig, term: &str) -> Vec<usize> {
    let needle = match normalize_term(term) {
        Some(needle) if config.searchable => needle,
        _ => return (0..rows.len()).collect(),
    };

    let fields = config.search_keys();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &fields, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// Filter typed rows.
///
/// Each row is serialized once to resolve its fields; rows that fail to
/// serialize have no resolvable fields and only survive when filtering is
/// disabled.
///
/// # Example
///
/// ```
/// use banca_table::{Column, TableConfig};
/// use banca_table::filter::filter;
/// use serde_json::json;
///
/// let rows = vec![json!({ "nombre": "Jose Lema" }), json!({ "nombre": "Marianela Montalvo" })];
/// let config = TableConfig::new("Clientes")
///     .column(Column::new("nombre", "Nombre"))
///     .search(&[], "Buscar...");
///
/// let found = filter(&rows, &config, "  LEMA ");
/// assert_eq!(found, vec![&rows[0]]);
/// ```
pub fn filter<'a, T: Serialize>(rows: &'a [T], config: &TableConfig, term: &str) -> Vec<&'a T> {
    let projections: Vec<Value> = rows.iter().map(project).collect();
    filter_indices(&projections, config, term)
        .into_iter()
        .map(|index| &rows[index])
        .collect()
}

/// Serialize a row into the JSON form used for path lookups.
pub fn project<T: Serialize>(row: &T) -> Value {
    serde_json::to_value(row).unwrap_or_else(|e| {
        log::warn!("Row could not be projected for lookup: {}", e);
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::Column;

    fn config() -> TableConfig {
        TableConfig::new("Clientes")
            .column(Column::new("nombre", "Nombre"))
            .column(Column::new("edad", "Edad"))
            .column(Column::new("telefono", "Teléfono"))
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({ "nombre": "Jose Lema", "edad": 35, "telefono": "098254785" }),
            json!({ "nombre": "Marianela Montalvo", "edad": 28, "telefono": null }),
            json!({ "nombre": "Juan Osorio", "edad": 41 }),
        ]
    }

    #[test]
    fn test_not_searchable_is_identity() {
        let rows = rows();
        assert_eq!(filter_indices(&rows, &config(), "jose"), vec![0, 1, 2]);
    }

    #[test]
    fn test_blank_term_is_identity() {
        let rows = rows();
        let config = config().search(&[], "");
        assert_eq!(filter_indices(&rows, &config, ""), vec![0, 1, 2]);
        assert_eq!(filter_indices(&rows, &config, "   "), vec![0, 1, 2]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let rows = rows();
        let config = config().search(&[], "");
        assert_eq!(filter_indices(&rows, &config, "MONTAL"), vec![1]);
        assert_eq!(filter_indices(&rows, &config, " o "), vec![0, 1, 2]);
    }

    #[test]
    fn test_numbers_match_by_string_form() {
        let rows = rows();
        let config = config().search(&[], "");
        assert_eq!(filter_indices(&rows, &config, "41"), vec![2]);
    }

    #[test]
    fn test_search_fields_restrict_candidates() {
        let rows = rows();
        let config = config().search(&["telefono"], "");
        assert_eq!(filter_indices(&rows, &config, "jose"), Vec::<usize>::new());
        assert_eq!(filter_indices(&rows, &config, "0982"), vec![0]);
    }

    #[test]
    fn test_missing_paths_never_match() {
        let rows = rows();
        let config = config().search(&["direccion.calle"], "");
        assert!(filter_indices(&rows, &config, "a").is_empty());
    }

    #[test]
    fn test_typed_rows() {
        #[derive(Serialize)]
        struct Row {
            nombre: &'static str,
        }

        let rows = [Row { nombre: "Ana" }, Row { nombre: "Luis" }];
        let config = TableConfig::new("t")
            .column(Column::new("nombre", "Nombre"))
            .search(&[], "");
        let found = filter(&rows, &config, "lu");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nombre, "Luis");
    }
}
