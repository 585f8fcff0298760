//! Data table component types.
//!
//! Column headers and the empty state for the record tables are configured
//! here and rendered by `templates/components/data_table.html`.

use serde::Serialize;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Right-align the column (numeric values, row actions).
    pub align_end: bool,
}

impl TableColumn {
    /// Create a left-aligned column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            align_end: false,
        }
    }

    /// Right-align this column.
    #[must_use]
    pub const fn end(mut self) -> Self {
        self.align_end = true;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    /// Unique table identifier, used as the element id.
    pub table_id: String,
    /// Column definitions in display order.
    pub columns: Vec<TableColumn>,
    /// Icon for empty state.
    pub empty_icon: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            empty_icon: "ph-list".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, icon: &str, title: &str, description: Option<&str>) -> Self {
        self.empty_icon = icon.to_string();
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Number of columns, for `colspan` on full-width rows.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Build the users table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    DataTableConfig::new("users")
        .column(TableColumn::new("id", "ID").end())
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("roles", "Roles"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("actions", "").end())
        .empty_state(
            "ph-users",
            "No users yet",
            Some("Add a user to get started"),
        )
}

/// Build the roles table configuration.
#[must_use]
pub fn roles_table_config() -> DataTableConfig {
    DataTableConfig::new("roles")
        .column(TableColumn::new("id", "ID").end())
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("permissions", "Permissions"))
        .column(TableColumn::new("actions", "").end())
        .empty_state("ph-shield", "No roles yet", None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_table_columns() {
        let config = users_table_config();
        let keys: Vec<&str> = config.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["id", "name", "email", "roles", "status", "actions"]);
        assert_eq!(config.width(), 6);
        assert!(config.columns[0].align_end);
    }

    #[test]
    fn test_roles_table_empty_state() {
        let config = roles_table_config();
        assert_eq!(config.table_id, "roles");
        assert_eq!(config.empty_title, "No roles yet");
        assert!(config.empty_description.is_none());
    }
}
