//! Table and column metadata consumed by every generator

use serde::{Deserialize, Serialize};

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as declared in the database
    pub name: String,

    /// JDBC type code (see [`super::jdbc_types`])
    pub jdbc_type_code: i32,

    /// JDBC / vendor type name (e.g. "VARCHAR", "uuid")
    pub jdbc_type_name: String,

    /// Declared size (characters for textual columns)
    pub size: i32,

    /// Whether the column is declared NOT NULL
    pub is_not_null: bool,

    /// Whether the column is auto-increment
    pub is_auto_increment: bool,

    /// Whether the column value is generated by the database
    pub is_generated: bool,
}

impl Column {
    /// Create a nullable, non-generated column
    pub fn new(name: impl Into<String>, jdbc_type_code: i32) -> Self {
        Self {
            name: name.into(),
            jdbc_type_code,
            jdbc_type_name: super::jdbc_types::type_name(jdbc_type_code)
                .unwrap_or("OTHER")
                .to_string(),
            size: 0,
            is_not_null: false,
            is_auto_increment: false,
            is_generated: false,
        }
    }

    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.jdbc_type_name = name.into();
        self
    }

    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_not_null = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    pub fn generated(mut self) -> Self {
        self.is_generated = true;
        self
    }
}

/// Metadata for a database table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,

    /// Columns in declaration order
    pub all_columns: Vec<Column>,

    /// Auto-increment columns (subset of `all_columns`)
    pub auto_increment_columns: Vec<Column>,

    /// Primary key columns in key order (subset of `all_columns`)
    pub primary_key_columns: Vec<Column>,

    /// Database-generated columns (subset of `all_columns`)
    pub generated_columns: Vec<Column>,

    /// Schema the table lives in, if any
    pub schema: Option<String>,
}

impl Table {
    /// Build a table, deriving the column subsets from the column flags and
    /// the primary key names. Key names that match no column are ignored.
    pub fn new(
        name: impl Into<String>,
        schema: Option<String>,
        columns: Vec<Column>,
        primary_key: &[&str],
    ) -> Self {
        let auto_increment_columns = columns
            .iter()
            .filter(|c| c.is_auto_increment)
            .cloned()
            .collect();
        let generated_columns = columns
            .iter()
            .filter(|c| c.is_generated)
            .cloned()
            .collect();
        let primary_key_columns = primary_key
            .iter()
            .filter_map(|key| columns.iter().find(|c| c.name == *key))
            .cloned()
            .collect();

        Self {
            name: name.into(),
            all_columns: columns,
            auto_increment_columns,
            primary_key_columns,
            generated_columns,
            schema,
        }
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.all_columns.iter().find(|c| c.name == name)
    }

    pub fn is_auto_increment(&self, column: &Column) -> bool {
        self.auto_increment_columns
            .iter()
            .any(|c| c.name == column.name)
    }

    pub fn is_generated(&self, column: &Column) -> bool {
        self.generated_columns.iter().any(|c| c.name == column.name)
    }

    /// Columns bound by `create` / `batchInsert`
    pub fn insertable_columns(&self) -> Vec<&Column> {
        self.all_columns
            .iter()
            .filter(|c| !self.is_auto_increment(c) && !self.is_generated(c))
            .collect()
    }

    /// Columns written by `save`
    pub fn updatable_columns(&self) -> Vec<&Column> {
        self.all_columns
            .iter()
            .filter(|c| !self.is_generated(c))
            .collect()
    }

    /// Columns keyed on by `find`, `save` and `destroy`.
    ///
    /// Without a declared primary key every non-generated column is used
    /// (every column when the table only has generated ones).
    pub fn effective_key_columns(&self) -> Vec<&Column> {
        if !self.primary_key_columns.is_empty() {
            return self.primary_key_columns.iter().collect();
        }
        let non_generated = self.updatable_columns();
        if non_generated.is_empty() {
            self.all_columns.iter().collect()
        } else {
            non_generated
        }
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key_columns.is_empty()
    }
}
