//! mapper-codegen: Generate ScalikeJDBC models, specs and ScalaCheck generators from table metadata
//!
//! This crate provides both a CLI tool and a library. Table metadata is read from a
//! JSON or TOML schema file and, for every table, the generator emits:
//!
//! - A case class plus a `SQLSyntaxSupport` companion with CRUD methods, built either with
//!   the query DSL or with `sql"..."` interpolation
//! - A test spec (ScalaTest `FixtureAnyFlatSpec`, specs2 unit or specs2 acceptance)
//! - A `<Class>Arbitrary` trait of ScalaCheck generators
//!
//! # Schema file
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "emp",
//!       "primary_key": ["id"],
//!       "columns": [
//!         { "name": "id", "jdbc_type_name": "BIGINT", "nullable": false, "auto_increment": true },
//!         { "name": "name", "jdbc_type_name": "VARCHAR", "size": 30, "nullable": false }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! # Programmatic Configuration
//!
//! ```rust,ignore
//! fn main() {
//!     mapper_codegen::GeneratorBuilder::new("schema.json")
//!         .package_name("com.example.models")
//!         .generate()
//!         .expect("Failed to generate models");
//! }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! mapper-codegen --schema schema.json --package com.example.models all
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod metadata;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use codegen::{CodeGenerator, UnitKind, WriteOutcome};
pub use config::GeneratorConfig;
pub use error::{CodegenError, Result};
pub use metadata::{Column, Table};

/// What happened to one generated unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationEvent {
    pub table: String,
    pub class_name: String,
    pub kind: UnitKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Main entry point: generate every unit kind for every included table
pub fn generate(config: &GeneratorConfig) -> Result<Vec<GenerationEvent>> {
    generate_units(config, &UnitKind::ALL)
}

/// Generate the given unit kinds for every included table
pub fn generate_units(config: &GeneratorConfig, kinds: &[UnitKind]) -> Result<Vec<GenerationEvent>> {
    let tables = load_tables(config)?;
    let events = generate_for_tables(&tables, config, kinds)?;
    info!("Code generation complete ({} units)", events.len());
    Ok(events)
}

/// Read the schema file and apply `include_tables`
pub fn load_tables(config: &GeneratorConfig) -> Result<Vec<Table>> {
    info!("Reading schema: {:?}", config.schema_file);
    let tables = metadata::load_tables(&config.schema_file)?;
    info!("Found {} tables", tables.len());

    let tables = filter_tables(tables, &config.include_tables);
    debug!(
        "After filtering: {} tables (include={})",
        tables.len(),
        config.include_tables
    );
    Ok(tables)
}

/// Generate units for already loaded tables
pub fn generate_for_tables(
    tables: &[Table],
    config: &GeneratorConfig,
    kinds: &[UnitKind],
) -> Result<Vec<GenerationEvent>> {
    let mut events = Vec::new();
    for table in tables {
        let generator = CodeGenerator::new(table, config);
        info!("Generating {} for table {}", generator.class_name(), table.name);
        for &kind in kinds {
            let Some(outcome) = generator.write_unit(kind, config.force)? else {
                continue;
            };
            let path = match kind {
                UnitKind::Model => generator.model_path(),
                UnitKind::Spec => generator.spec_path(),
                UnitKind::Arbitrary => generator.arbitrary_path(),
            };
            events.push(GenerationEvent {
                table: table.name.clone(),
                class_name: generator.class_name().to_string(),
                kind,
                path,
                outcome,
            });
        }
    }
    Ok(events)
}

/// Filter tables based on the include pattern (`*` or comma-separated names)
fn filter_tables(tables: Vec<Table>, include: &str) -> Vec<Table> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<&str> = include
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    tables
        .into_iter()
        .filter(|t| include_all || include_set.contains(t.name.as_str()))
        .collect()
}

/// Builder pattern for programmatic configuration
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Create a new builder with the given schema file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: GeneratorConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Set the directory models are written to
    pub fn src_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.src_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the directory specs and generators are written to
    pub fn test_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.test_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn package_name(mut self, name: &str) -> Self {
        self.config.package_name = name.to_string();
        self
    }

    pub fn template(mut self, template: config::GeneratorTemplate) -> Self {
        self.config.template = template;
        self
    }

    pub fn test_template(mut self, name: &str) -> Self {
        self.config.test_template = name.to_string();
        self
    }

    pub fn return_collection_type(mut self, kind: config::ReturnCollectionType) -> Self {
        self.config.return_collection_type = kind;
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Tables whose model is never written by the conditional write
    pub fn skip_tables(mut self, tables: &[&str]) -> Self {
        self.config.table_names_to_skip = tables.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Overwrite existing files
    pub fn force(mut self) -> Self {
        self.config.force = true;
        self
    }

    /// Enable dry run mode (report without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Get the configuration built so far
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validate the configuration and generate the code
    pub fn generate(self) -> Result<Vec<GenerationEvent>> {
        self.config.validate()?;
        generate(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> Table {
        Table::new(name, None, Vec::new(), &[])
    }

    #[test]
    fn test_filter_tables() {
        let tables = vec![table("emp"), table("dept"), table("audit")];
        assert_eq!(filter_tables(tables.clone(), "*").len(), 3);
        assert_eq!(filter_tables(tables.clone(), "").len(), 3);

        let names: Vec<String> = filter_tables(tables, "emp, audit")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["emp", "audit"]);
    }

    #[test]
    fn test_builder() {
        let builder = GeneratorBuilder::new("schema.json")
            .package_name("com.example")
            .include_tables(&["emp", "dept"])
            .skip_tables(&["dept"])
            .force()
            .dry_run();
        let config = builder.config();
        assert_eq!(config.schema_file, PathBuf::from("schema.json"));
        assert_eq!(config.package_name, "com.example");
        assert_eq!(config.include_tables, "emp,dept");
        assert_eq!(config.table_names_to_skip, vec!["dept"]);
        assert!(config.force);
        assert!(config.dry_run);
    }
}
