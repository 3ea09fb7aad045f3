//! Schema type definitions
//!
//! A `SchemaDefinition` describes one database: its create statement and
//! the tables and views inside it.

use serde::{Deserialize, Serialize};

/// Kind of table entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableType {
    /// Regular table
    #[default]
    BaseTable,
    /// View
    View,
}

/// One table or view of a database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableDefinition {
    /// Table name
    pub name: String,
    /// Create statement for the table
    pub schema: String,
    /// Column names, in table order
    pub columns: Vec<String>,
    /// Primary key column names
    pub primary_key_columns: Vec<String>,
    /// Table or view
    #[serde(rename = "type")]
    pub table_type: TableType,
    /// Approximate data size in bytes
    pub data_length: u64,
    /// Approximate row count
    pub row_count: u64,
}

impl TableDefinition {
    /// Create a base table with the given create statement.
    pub fn table(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            ..Self::default()
        }
    }

    /// Create a view with the given create statement.
    pub fn view(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            table_type: TableType::View,
            ..Self::default()
        }
    }

    /// Set column names.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set primary key column names.
    pub fn with_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Check if this entry is a view.
    pub fn is_view(&self) -> bool {
        self.table_type == TableType::View
    }
}

/// Schema of one database
///
/// An empty `table_definitions` list is a valid schema: it describes a
/// database with no tables, which is not the same as having no schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaDefinition {
    /// Create statement for the database itself
    pub database_schema: String,
    /// Tables and views, in engine order
    pub table_definitions: Vec<TableDefinition>,
    /// Opaque version tag of this definition
    pub version: String,
}

impl SchemaDefinition {
    /// Create a schema definition.
    pub fn new(
        database_schema: impl Into<String>,
        table_definitions: Vec<TableDefinition>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            database_schema: database_schema.into(),
            table_definitions,
            version: version.into(),
        }
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.table_definitions.iter().find(|t| t.name == name)
    }

    /// Table names, in order.
    pub fn table_names(&self) -> Vec<&str> {
        self.table_definitions.iter().map(|t| t.name.as_str()).collect()
    }

    /// Check if the schema has no tables.
    pub fn is_empty(&self) -> bool {
        self.table_definitions.is_empty()
    }
}
