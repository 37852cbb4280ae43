//! Schema description files (JSON or TOML) produced by an introspection step

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::jdbc_types;
use super::table::{Column, Table};
use crate::error::{CodegenError, Result};

/// Top-level layout of a schema file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

/// A table as written in a schema file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,

    #[serde(default)]
    pub schema: Option<String>,

    /// Primary key column names, in key order
    #[serde(default)]
    pub primary_key: Vec<String>,

    pub columns: Vec<ColumnDefinition>,
}

/// A column as written in a schema file.
///
/// Either `jdbc_type_code` or `jdbc_type_name` must be given; a name that is
/// not a standard JDBC type keeps code `OTHER`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,

    #[serde(default)]
    pub jdbc_type_code: Option<i32>,

    #[serde(default)]
    pub jdbc_type_name: Option<String>,

    #[serde(default)]
    pub size: i32,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default)]
    pub auto_increment: bool,

    #[serde(default)]
    pub generated: bool,
}

fn default_nullable() -> bool {
    true
}

impl TableDefinition {
    fn into_table(self) -> Result<Table> {
        let columns = self
            .columns
            .into_iter()
            .map(|c| c.into_column(&self.name))
            .collect::<Result<Vec<_>>>()?;
        let primary_key: Vec<&str> = self.primary_key.iter().map(String::as_str).collect();
        Ok(Table::new(self.name.clone(), self.schema, columns, &primary_key))
    }
}

impl ColumnDefinition {
    fn into_column(self, table_name: &str) -> Result<Column> {
        let code = match (self.jdbc_type_code, self.jdbc_type_name.as_deref()) {
            (Some(code), _) => code,
            (None, Some(name)) => jdbc_types::code_for_name(name).unwrap_or(jdbc_types::OTHER),
            (None, None) => {
                return Err(CodegenError::ParseError(format!(
                    "column {}.{} needs jdbc_type_code or jdbc_type_name",
                    table_name, self.name
                )))
            }
        };
        let type_name = self.jdbc_type_name.unwrap_or_else(|| {
            jdbc_types::type_name(code)
                .unwrap_or("OTHER")
                .to_string()
        });

        Ok(Column {
            name: self.name,
            jdbc_type_code: code,
            jdbc_type_name: type_name,
            size: self.size,
            is_not_null: !self.nullable,
            is_auto_increment: self.auto_increment,
            is_generated: self.generated,
        })
    }
}

/// Parse schema file content; TOML when `is_toml`, JSON otherwise
pub fn parse_tables(content: &str, is_toml: bool) -> Result<Vec<Table>> {
    let file: SchemaFile = if is_toml {
        toml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    file.tables
        .into_iter()
        .map(TableDefinition::into_table)
        .collect()
}

/// Load tables from a `.json` or `.toml` schema file
pub fn load_tables(path: &Path) -> Result<Vec<Table>> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    parse_tables(&content, is_toml)
}
