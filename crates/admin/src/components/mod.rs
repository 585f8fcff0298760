//! Reusable view components.

pub mod data_table;

pub use data_table::{DataTableConfig, TableColumn, roles_table_config, users_table_config};
