//! Dot-path lookup into row projections.

use serde_json::Value;

/// Resolve a dot-separated path against a JSON value.
///
/// Object segments are looked up by key; array segments by numeric index.
/// Returns `None` when any segment is missing or when the final value is
/// null, so callers never need to distinguish "absent" from "null".
///
/// # Example
///
/// ```
/// use banca_table::path::resolve;
/// use serde_json::json;
///
/// let row = json!({ "cliente": { "nombre": "Jose Lema" } });
/// assert_eq!(resolve(&row, "cliente.nombre"), Some(&json!("Jose Lema")));
/// assert_eq!(resolve(&row, "cliente.direccion.calle"), None);
/// ```
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_top_level_key() {
        let row = json!({ "id": 7, "nombre": "Marianela" });
        assert_eq!(resolve(&row, "id"), Some(&json!(7)));
    }

    #[test]
    fn test_nested_and_indexed() {
        let row = json!({ "cuentas": [ { "numeroCuenta": "478758" } ] });
        assert_eq!(resolve(&row, "cuentas.0.numeroCuenta"), Some(&json!("478758")));
        assert_eq!(resolve(&row, "cuentas.1.numeroCuenta"), None);
        assert_eq!(resolve(&row, "cuentas.x"), None);
    }

    #[test]
    fn test_null_is_missing() {
        let row = json!({ "telefono": null });
        assert_eq!(resolve(&row, "telefono"), None);
        assert_eq!(resolve(&row, "telefono.numero"), None);
    }

    #[test]
    fn test_scalar_root() {
        assert_eq!(resolve(&json!(5), "a"), None);
        assert_eq!(resolve(&json!({}), ""), None);
    }
}
