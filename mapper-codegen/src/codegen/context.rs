//! Per-table naming and typing shared by the model, spec and arbitrary generators

use crate::config::GeneratorConfig;
use crate::metadata::{Column, Table};

use super::default_value::{default_value, sample_value};
use super::naming;
use super::type_resolver::{ScalaType, TypeResolver};

/// A column with everything derived from it resolved once
#[derive(Debug, Clone)]
pub struct ScalaColumn<'a> {
    pub column: &'a Column,
    /// Scala identifier, possibly backtick-quoted
    pub field_name: String,
    /// Resolved type without nullability
    pub raw_type: ScalaType,
    /// Resolved type with `Option` for nullable columns
    pub field_type: ScalaType,
    /// Sample literal for `raw_type`
    pub default_value: String,
    /// Sample literal for `field_type`
    pub sample_value: String,
}

impl ScalaColumn<'_> {
    pub fn type_string(&self) -> String {
        self.field_type.to_type_string()
    }

    pub fn is_any(&self) -> bool {
        self.raw_type == ScalaType::Any
    }

    pub fn is_not_null(&self) -> bool {
        self.column.is_not_null
    }

    /// Field name without backticks, for string literals and named placeholders
    pub fn plain_name(&self) -> &str {
        naming::unquote(&self.field_name)
    }
}

/// Names and columns of one table under one configuration
#[derive(Debug)]
pub struct TableContext<'a> {
    pub table: &'a Table,
    pub config: &'a GeneratorConfig,
    pub class_name: String,
    /// Alias passed to `syntax("...")`
    pub syntax_name: String,
    /// Identifier holding the syntax provider
    pub syntax_var: String,
    /// All columns in declaration order
    pub columns: Vec<ScalaColumn<'a>>,
}

impl<'a> TableContext<'a> {
    pub fn new(table: &'a Table, config: &'a GeneratorConfig) -> Self {
        Self::with_class_name(table, config, None)
    }

    /// Like [`TableContext::new`], with an explicit class name instead of the configured mapping
    pub fn with_class_name(
        table: &'a Table,
        config: &'a GeneratorConfig,
        class_name: Option<&str>,
    ) -> Self {
        let class_name = class_name
            .map(str::to_string)
            .unwrap_or_else(|| config.table_name_to_class_name.apply(&table.name));
        let resolver = TypeResolver::new(config);

        let columns = table
            .all_columns
            .iter()
            .map(|column| {
                let raw_type = resolver.raw_type(column, &class_name);
                let field_type = resolver.resolve(column, &class_name);
                ScalaColumn {
                    column,
                    field_name: config.column_name_to_field_name.apply(&column.name),
                    default_value: default_value(&raw_type, config),
                    sample_value: sample_value(&field_type, config),
                    raw_type,
                    field_type,
                }
            })
            .collect();

        Self {
            table,
            config,
            syntax_name: config.table_name_to_syntax_name.apply(&table.name),
            syntax_var: config.table_name_to_syntax_variable_name.apply(&table.name),
            class_name,
            columns,
        }
    }

    fn pick(&self, subset: Vec<&Column>) -> Vec<&ScalaColumn<'a>> {
        subset
            .into_iter()
            .filter_map(|c| self.columns.iter().find(|sc| sc.column.name == c.name))
            .collect()
    }

    /// Primary key columns, or the fallback key set
    pub fn key_columns(&self) -> Vec<&ScalaColumn<'a>> {
        self.pick(self.table.effective_key_columns())
    }

    pub fn insertable_columns(&self) -> Vec<&ScalaColumn<'a>> {
        self.pick(self.table.insertable_columns())
    }

    pub fn updatable_columns(&self) -> Vec<&ScalaColumn<'a>> {
        self.pick(self.table.updatable_columns())
    }

    /// Auto-increment column that receives the generated key
    pub fn generated_key_column(&self) -> Option<&ScalaColumn<'a>> {
        self.table
            .auto_increment_columns
            .first()
            .and_then(|c| self.columns.iter().find(|sc| sc.column.name == c.name))
    }

    /// `(implicit session: DBSession = autoSession, <extra>)`
    pub fn session_params(&self, extra: Option<String>) -> String {
        let session = if self.config.default_auto_session {
            "session: DBSession = autoSession"
        } else {
            "session: DBSession"
        };
        match extra {
            Some(extra) => format!("(implicit {}, {})", session, extra),
            None => format!("(implicit {})", session),
        }
    }

    /// Import lines for date-time and `java.sql` classes used by any column,
    /// plus the configured extra imports
    pub fn type_imports(&self) -> Vec<String> {
        let mut time_packages: Vec<(&str, Vec<&str>)> = Vec::new();
        let mut java_sql: Vec<&str> = Vec::new();

        for col in &self.columns {
            if let Some((package, class)) = col.field_type.time_import(self.config.date_time_class)
            {
                match time_packages.iter().position(|(p, _)| *p == package) {
                    Some(idx) => {
                        let classes = &mut time_packages[idx].1;
                        if !classes.contains(&class) {
                            classes.push(class);
                        }
                    }
                    None => time_packages.push((package, vec![class])),
                }
            }
            if let Some(class) = col.field_type.java_sql_import() {
                if !java_sql.contains(&class) {
                    java_sql.push(class);
                }
            }
        }

        let mut imports: Vec<String> = time_packages
            .into_iter()
            .map(|(package, classes)| format!("import {}.{{{}}}", package, classes.join(", ")))
            .collect();
        if !java_sql.is_empty() {
            imports.push(format!("import java.sql.{{{}}}", java_sql.join(", ")));
        }
        imports.extend(
            self.config
                .extra_imports
                .iter()
                .map(|i| format!("import {}", i.trim_start_matches("import ").trim())),
        );
        imports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::jdbc_types;

    fn make_table() -> Table {
        Table::new(
            "member_group",
            None,
            vec![
                Column::new("id", jdbc_types::BIGINT).not_null().auto_increment(),
                Column::new("name", jdbc_types::VARCHAR).size(30).not_null(),
                Column::new("birthday", jdbc_types::DATE),
                Column::new("created_at", jdbc_types::TIMESTAMP).not_null(),
                Column::new("photo", jdbc_types::BLOB),
                Column::new("type", jdbc_types::VARCHAR).generated(),
            ],
            &["id"],
        )
    }

    #[test]
    fn test_names() {
        let table = make_table();
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        assert_eq!(ctx.class_name, "MemberGroup");
        assert_eq!(ctx.syntax_name, "mg");
        assert_eq!(ctx.columns[3].field_name, "createdAt");
        assert_eq!(ctx.columns[5].field_name, "`type`");
        assert_eq!(ctx.columns[5].plain_name(), "type");
    }

    #[test]
    fn test_partitions() {
        let table = make_table();
        let config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        let insertable: Vec<&str> = ctx
            .insertable_columns()
            .iter()
            .map(|c| c.plain_name())
            .collect();
        assert_eq!(insertable, vec!["name", "birthday", "createdAt", "photo"]);
        assert_eq!(ctx.key_columns().len(), 1);
        assert_eq!(ctx.generated_key_column().unwrap().field_name, "id");
        assert_eq!(ctx.updatable_columns().len(), 5);
    }

    #[test]
    fn test_type_imports() {
        let table = make_table();
        let mut config = GeneratorConfig::default();
        config.extra_imports.push("com.example.Codecs._".to_string());
        let ctx = TableContext::new(&table, &config);
        assert_eq!(
            ctx.type_imports(),
            vec![
                "import java.time.{LocalDate, ZonedDateTime}".to_string(),
                "import java.sql.{Blob}".to_string(),
                "import com.example.Codecs._".to_string(),
            ]
        );
    }

    #[test]
    fn test_session_params() {
        let table = make_table();
        let mut config = GeneratorConfig::default();
        let ctx = TableContext::new(&table, &config);
        assert_eq!(
            ctx.session_params(None),
            "(implicit session: DBSession = autoSession)"
        );
        config.default_auto_session = false;
        let ctx = TableContext::new(&table, &config);
        assert_eq!(
            ctx.session_params(Some("factory: Factory[Int, C[Int]]".to_string())),
            "(implicit session: DBSession, factory: Factory[Int, C[Int]])"
        );
    }
}
