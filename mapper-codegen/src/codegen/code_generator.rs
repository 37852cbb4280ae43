//! Main code generator orchestrator

use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::metadata::Table;

use super::arbitrary_generator::generate_arbitrary;
use super::context::TableContext;
use super::model_generator::generate_model;
use super::spec_generator::{generate_spec, spec_class_name};
use super::writer::{GeneratedUnit, SkipReason, WriteOutcome, Writer};

/// Kind of source unit generated for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Model,
    Spec,
    Arbitrary,
}

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Model, UnitKind::Spec, UnitKind::Arbitrary];
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Spec => write!(f, "spec"),
            Self::Arbitrary => write!(f, "arbitrary"),
        }
    }
}

/// Generates and writes the sources of one table
pub struct CodeGenerator<'a> {
    ctx: TableContext<'a>,
    writer: Writer,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator for a table
    pub fn new(table: &'a Table, config: &'a GeneratorConfig) -> Self {
        Self::with_class_name(table, config, None)
    }

    /// Like [`CodeGenerator::new`], overriding the class name derived from the table name
    pub fn with_class_name(
        table: &'a Table,
        config: &'a GeneratorConfig,
        class_name: Option<&str>,
    ) -> Self {
        Self {
            ctx: TableContext::with_class_name(table, config, class_name),
            writer: Writer::new(config.dry_run),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.ctx.class_name
    }

    fn config(&self) -> &GeneratorConfig {
        self.ctx.config
    }

    fn finish(&self, code: String) -> String {
        self.config().line_break.apply(&code)
    }

    pub fn model_code(&self) -> String {
        self.finish(generate_model(&self.ctx))
    }

    /// `None` when the configured test template is not supported
    pub fn spec_code(&self) -> Option<String> {
        generate_spec(&self.ctx).map(|code| self.finish(code))
    }

    pub fn arbitrary_code(&self) -> String {
        self.finish(generate_arbitrary(&self.ctx))
    }

    /// `<src_dir>/<package>/<Class>.scala`
    pub fn model_path(&self) -> PathBuf {
        self.config()
            .src_dir
            .join(self.config().package_path())
            .join(format!("{}.scala", self.ctx.class_name))
    }

    /// `<test_dir>/<package>/<Class>Spec.scala` (or `Abstract<Class>Spec.scala`)
    pub fn spec_path(&self) -> PathBuf {
        self.config()
            .test_dir
            .join(self.config().package_path())
            .join(format!("{}.scala", spec_class_name(&self.ctx)))
    }

    /// `<test_dir>/<package>/<Class>Arbitrary.scala`
    pub fn arbitrary_path(&self) -> PathBuf {
        self.config()
            .test_dir
            .join(self.config().package_path())
            .join(format!("{}Arbitrary.scala", self.ctx.class_name))
    }

    pub fn model_unit(&self) -> GeneratedUnit {
        GeneratedUnit::new(self.model_path(), self.model_code())
    }

    pub fn spec_unit(&self) -> Option<GeneratedUnit> {
        self.spec_code()
            .map(|code| GeneratedUnit::new(self.spec_path(), code))
    }

    pub fn arbitrary_unit(&self) -> GeneratedUnit {
        GeneratedUnit::new(self.arbitrary_path(), self.arbitrary_code())
    }

    fn is_skipped_table(&self) -> bool {
        self.config()
            .table_names_to_skip
            .iter()
            .any(|name| *name == self.ctx.table.name)
    }

    /// Write the model, replacing any existing file
    pub fn write_model(&self) -> Result<WriteOutcome> {
        let outcome = self.writer.write(&self.model_unit())?;
        self.report(UnitKind::Model, outcome);
        Ok(outcome)
    }

    /// Write the model unless the file exists or the table is listed as skipped
    pub fn write_model_if_nonexistent_and_unskippable(&self) -> Result<WriteOutcome> {
        let outcome = if self.is_skipped_table() {
            WriteOutcome::Skipped {
                reason: SkipReason::SkippedTable,
            }
        } else {
            self.writer.write_if_not_exist(&self.model_unit())?
        };
        self.report(UnitKind::Model, outcome);
        Ok(outcome)
    }

    /// Write the spec, replacing any existing file. `None` when no spec is generated.
    pub fn write_spec(&self) -> Result<Option<WriteOutcome>> {
        let Some(unit) = self.spec_unit() else {
            return Ok(None);
        };
        let outcome = self.writer.write(&unit)?;
        self.report(UnitKind::Spec, outcome);
        Ok(Some(outcome))
    }

    pub fn write_spec_if_not_exist(&self) -> Result<Option<WriteOutcome>> {
        let Some(unit) = self.spec_unit() else {
            return Ok(None);
        };
        let outcome = self.writer.write_if_not_exist(&unit)?;
        self.report(UnitKind::Spec, outcome);
        Ok(Some(outcome))
    }

    pub fn write_arbitrary(&self) -> Result<WriteOutcome> {
        let outcome = self.writer.write(&self.arbitrary_unit())?;
        self.report(UnitKind::Arbitrary, outcome);
        Ok(outcome)
    }

    pub fn write_arbitrary_if_not_exist(&self) -> Result<WriteOutcome> {
        let outcome = self.writer.write_if_not_exist(&self.arbitrary_unit())?;
        self.report(UnitKind::Arbitrary, outcome);
        Ok(outcome)
    }

    /// Write one kind of unit, forcing when `force` is set.
    /// `None` when nothing was generated for it.
    pub fn write_unit(&self, kind: UnitKind, force: bool) -> Result<Option<WriteOutcome>> {
        match (kind, force) {
            (UnitKind::Model, true) => self.write_model().map(Some),
            (UnitKind::Model, false) => self
                .write_model_if_nonexistent_and_unskippable()
                .map(Some),
            (UnitKind::Spec, true) => self.write_spec(),
            (UnitKind::Spec, false) => self.write_spec_if_not_exist(),
            (UnitKind::Arbitrary, true) => self.write_arbitrary().map(Some),
            (UnitKind::Arbitrary, false) => self.write_arbitrary_if_not_exist().map(Some),
        }
    }

    fn report(&self, kind: UnitKind, outcome: WriteOutcome) {
        info!(
            "{} {} for {}: {}",
            self.ctx.class_name, kind, self.ctx.table.name, outcome
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineBreak;
    use crate::metadata::{jdbc_types, Column};
    use std::path::Path;
    use tempfile::TempDir;

    fn emp() -> Table {
        Table::new(
            "emp",
            None,
            vec![
                Column::new("id", jdbc_types::BIGINT).not_null().auto_increment(),
                Column::new("name", jdbc_types::VARCHAR).size(30).not_null(),
            ],
            &["id"],
        )
    }

    fn config_in(dir: &Path) -> GeneratorConfig {
        GeneratorConfig {
            src_dir: dir.join("src/main/scala"),
            test_dir: dir.join("src/test/scala"),
            package_name: "com.example.models".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_paths() {
        let dir = TempDir::new().unwrap();
        let table = emp();
        let mut config = config_in(dir.path());
        let generator = CodeGenerator::new(&table, &config);
        assert_eq!(
            generator.model_path(),
            dir.path().join("src/main/scala/com/example/models/Emp.scala")
        );
        assert_eq!(
            generator.spec_path(),
            dir.path().join("src/test/scala/com/example/models/EmpSpec.scala")
        );
        assert_eq!(
            generator.arbitrary_path(),
            dir.path().join("src/test/scala/com/example/models/EmpArbitrary.scala")
        );

        config.abstract_spec = true;
        let generator = CodeGenerator::new(&table, &config);
        assert!(generator.spec_path().ends_with("AbstractEmpSpec.scala"));
    }

    #[test]
    fn test_model_write_modes() {
        let dir = TempDir::new().unwrap();
        let table = emp();
        let config = config_in(dir.path());
        let generator = CodeGenerator::new(&table, &config);

        assert_eq!(
            generator.write_model_if_nonexistent_and_unskippable().unwrap(),
            WriteOutcome::Created
        );
        assert_eq!(
            generator.write_model_if_nonexistent_and_unskippable().unwrap(),
            WriteOutcome::Skipped {
                reason: SkipReason::AlreadyExists
            }
        );
        assert_eq!(generator.write_model().unwrap(), WriteOutcome::Overwritten);
    }

    #[test]
    fn test_skipped_table() {
        let dir = TempDir::new().unwrap();
        let table = emp();
        let config = GeneratorConfig {
            table_names_to_skip: vec!["emp".to_string()],
            ..config_in(dir.path())
        };
        let generator = CodeGenerator::new(&table, &config);
        assert_eq!(
            generator.write_model_if_nonexistent_and_unskippable().unwrap(),
            WriteOutcome::Skipped {
                reason: SkipReason::SkippedTable
            }
        );
        assert!(!generator.model_path().exists());
        assert!(generator.write_model().unwrap().is_written());
    }

    #[test]
    fn test_unknown_test_template_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let table = emp();
        let config = GeneratorConfig {
            test_template: "unknown".to_string(),
            ..config_in(dir.path())
        };
        let generator = CodeGenerator::new(&table, &config);
        assert!(generator.write_spec_if_not_exist().unwrap().is_none());
        assert!(generator.write_spec().unwrap().is_none());
        assert!(!generator.spec_path().exists());
    }

    #[test]
    fn test_crlf_line_breaks() {
        let dir = TempDir::new().unwrap();
        let table = emp();
        let config = GeneratorConfig {
            line_break: LineBreak::Crlf,
            ..config_in(dir.path())
        };
        let generator = CodeGenerator::new(&table, &config);
        let code = generator.arbitrary_code();
        assert!(code.contains("\r\n"));
        assert!(!code.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_explicit_class_name() {
        let table = emp();
        let config = GeneratorConfig::default();
        let generator = CodeGenerator::with_class_name(&table, &config, Some("Employee"));
        assert_eq!(generator.class_name(), "Employee");
        assert!(generator.model_code().contains("case class Employee("));
    }
}
