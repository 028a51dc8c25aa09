//! Declarative table configuration.
//!
//! A [`TableConfig`] is plain data: columns, row actions, search and
//! pagination settings. Feature views build one at startup (or deserialize
//! it) and hand it to a [`TableEngine`](crate::TableEngine). Nothing here
//! carries behavior beyond small lookups.

use serde::Deserialize;
use serde::Serialize;

use crate::paginate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Column
// =============================================================================

/// How a column's raw value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Plain string form of the value.
    #[default]
    Text,
    /// Timestamp rendered as a short date.
    Date,
    /// Number rendered as money, see [`Column::format`].
    Currency,
    /// Boolean rendered through a [`BadgeConfig`].
    Badge,
    /// Boolean rendered as "Sí" / "No".
    Boolean,
}

/// Style hooks and labels for a badge column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeConfig {
    pub true_class: String,
    pub false_class: String,
    pub true_label: String,
    pub false_label: String,
}

impl BadgeConfig {
    /// Creates a badge config with the given labels and the default
    /// `badge-active` / `badge-inactive` classes.
    pub fn new(true_label: impl Into<String>, false_label: impl Into<String>) -> Self {
        Self {
            true_class: "badge-active".to_string(),
            false_class: "badge-inactive".to_string(),
            true_label: true_label.into(),
            false_label: false_label.into(),
        }
    }

    /// Overrides the style classes.
    pub fn classes(mut self, true_class: impl Into<String>, false_class: impl Into<String>) -> Self {
        self.true_class = true_class.into();
        self.false_class = false_class.into();
        self
    }
}

/// A displayed field.
///
/// # Examples
///
/// ```
/// use banca_table::{BadgeConfig, Column};
///
/// let columns = vec![
///     Column::new("numeroCuenta", "Número de Cuenta"),
///     Column::new("saldoActual", "Saldo").currency("USD"),
///     Column::new("estado", "Estado").badge(BadgeConfig::new("Activa", "Inactiva")),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Dot-separated path into the row record.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Render type.
    #[serde(rename = "type", default)]
    pub kind: ColumnKind,
    /// Type-specific hint. For currency columns, the ISO currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Badge labels and classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_config: Option<BadgeConfig>,
}

impl Column {
    /// Create a text column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Text,
            format: None,
            badge_config: None,
        }
    }

    /// Render this column as a short date.
    pub fn date(mut self) -> Self {
        self.kind = ColumnKind::Date;
        self
    }

    /// Render this column as money in the given currency.
    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.kind = ColumnKind::Currency;
        self.format = Some(code.into());
        self
    }

    /// Render this column as "Sí" / "No".
    pub fn boolean(mut self) -> Self {
        self.kind = ColumnKind::Boolean;
        self
    }

    /// Render this column as a badge.
    pub fn badge(mut self, config: BadgeConfig) -> Self {
        self.kind = ColumnKind::Badge;
        self.badge_config = Some(config);
        self
    }
}

// =============================================================================
// Action
// =============================================================================

/// The kind of a row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Edit,
    Delete,
    View,
    Toggle,
    Custom,
}

impl ActionKind {
    /// The tag reported to the owning view.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Edit => "edit",
            ActionKind::Delete => "delete",
            ActionKind::View => "view",
            ActionKind::Toggle => "toggle",
            ActionKind::Custom => "custom",
        }
    }
}

/// A per-row action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub label: String,
    pub action: ActionKind,
    /// Style hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Style hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Free-form tag, used when `action` is [`ActionKind::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_action: Option<String>,
}

impl Action {
    /// Create an action of the given kind.
    pub fn new(label: impl Into<String>, action: ActionKind) -> Self {
        Self {
            label: label.into(),
            action,
            class: None,
            icon: None,
            custom_action: None,
        }
    }

    /// Create a custom action carrying a free-form tag.
    pub fn custom(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            custom_action: Some(tag.into()),
            ..Self::new(label, ActionKind::Custom)
        }
    }

    /// Set the style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The tag emitted when this action is triggered.
    ///
    /// Custom actions report their `custom_action` tag (or `"custom"` when
    /// none is set); every other kind reports its own name.
    pub fn tag(&self) -> &str {
        match (self.action, &self.custom_action) {
            (ActionKind::Custom, Some(tag)) => tag,
            (kind, _) => kind.as_str(),
        }
    }
}

// =============================================================================
// TableConfig
// =============================================================================

/// Complete configuration for one table.
///
/// # Examples
///
/// ```
/// use banca_table::{Action, ActionKind, Column, TableConfig};
///
/// let config = TableConfig::new("Gestión de Cuentas")
///     .column(Column::new("numeroCuenta", "Número de Cuenta"))
///     .column(Column::new("saldoActual", "Saldo").currency("USD"))
///     .action(Action::new("Ver", ActionKind::View))
///     .search(&["numeroCuenta"], "Buscar por número de cuenta...")
///     .pageable(10);
///
/// assert_eq!(config.search_keys(), vec!["numeroCuenta"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    pub title: String,
    pub columns: Vec<Column>,
    pub actions: Vec<Action>,
    pub searchable: bool,
    /// Paths searched by the filter. Empty means every column key.
    pub search_fields: Vec<String>,
    pub search_placeholder: String,
    pub pageable: bool,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub show_create_button: bool,
    pub create_button_label: String,
    pub no_data_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            columns: Vec::new(),
            actions: Vec::new(),
            searchable: false,
            search_fields: Vec::new(),
            search_placeholder: "Buscar...".to_string(),
            pageable: false,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![5, 10, 25, 50],
            show_create_button: false,
            create_button_label: "Nuevo".to_string(),
            no_data_message: "No hay datos registrados".to_string(),
        }
    }
}

impl TableConfig {
    /// Create an empty configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append a row action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Enable search over the given fields (empty slice means all columns).
    pub fn search(mut self, fields: &[&str], placeholder: impl Into<String>) -> Self {
        self.searchable = true;
        self.search_fields = fields.iter().map(|s| s.to_string()).collect();
        self.search_placeholder = placeholder.into();
        self
    }

    /// Enable pagination with the given default page size.
    pub fn pageable(mut self, page_size: usize) -> Self {
        self.pageable = true;
        self.page_size = page_size;
        self
    }

    /// Set the page sizes offered to the user.
    pub fn page_size_options(mut self, options: &[usize]) -> Self {
        self.page_size_options = options.to_vec();
        self
    }

    /// Show a create button with the given label.
    pub fn create_button(mut self, label: impl Into<String>) -> Self {
        self.show_create_button = true;
        self.create_button_label = label.into();
        self
    }

    /// Set the message shown when there are no rows.
    pub fn no_data_message(mut self, message: impl Into<String>) -> Self {
        self.no_data_message = message.into();
        self
    }

    /// The field paths the search filter inspects.
    pub fn search_keys(&self) -> Vec<&str> {
        if self.search_fields.is_empty() {
            self.columns.iter().map(|c| c.key.as_str()).collect()
        } else {
            self.search_fields.iter().map(String::as_str).collect()
        }
    }

    /// Find an action by its emitted tag.
    pub fn find_action(&self, tag: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.tag() == tag)
    }

    /// Find a column by key.
    pub fn find_column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }
}
