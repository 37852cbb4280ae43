//! Configuration settings for mapper-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::defaults;
use super::name_fn::{self, NameFn};
use super::options::{
    ColumnTypeOverride, DateTimeClass, GeneratorTemplate, LineBreak, ReturnCollectionType,
};
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Path to the schema description file (JSON or TOML)
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Root directory for model sources
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Root directory for spec and arbitrary sources
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,

    /// Scala package of the generated code
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// SQL construction style
    #[serde(default)]
    pub template: GeneratorTemplate,

    /// Test framework template identifier; unknown values generate no spec
    #[serde(default = "default_test_template")]
    pub test_template: String,

    /// Collection returned by multi-row reads and batch inserts
    #[serde(default)]
    pub return_collection_type: ReturnCollectionType,

    /// Scala type for TIMESTAMP columns, which also picks the date-time family
    #[serde(default)]
    pub date_time_class: DateTimeClass,

    #[serde(default)]
    pub line_break: LineBreak,

    /// Tables whose model is never written by the conditional write
    #[serde(default)]
    pub table_names_to_skip: Vec<String>,

    /// Extra types the case class extends
    #[serde(default)]
    pub base_types: Vec<String>,

    /// Extra types the companion object mixes in
    #[serde(default)]
    pub companion_base_types: Vec<String>,

    /// Extra types the spec class mixes in
    #[serde(default)]
    pub spec_base_types: Vec<String>,

    /// Extra import lines (without the `import ` keyword)
    #[serde(default)]
    pub extra_imports: Vec<String>,

    /// Exact `(class, field) -> type` overrides, checked first
    #[serde(default)]
    pub type_mapping_by_column: Vec<ColumnTypeOverride>,

    /// `jdbc type name -> type` overrides, checked second
    #[serde(default)]
    pub type_mapping_by_jdbc_type_name: BTreeMap<String, String>,

    /// `resolved type -> sample literal` overrides
    #[serde(default)]
    pub default_value_by_type: BTreeMap<String, String>,

    /// Emit only the case class, without the companion access object
    #[serde(default = "default_case_class_only")]
    pub case_class_only: bool,

    /// Use `autoConstruct` in the result extractor
    #[serde(default = "default_auto_construct")]
    pub auto_construct: bool,

    /// Give implicit session parameters an `autoSession` default
    #[serde(default = "default_default_auto_session")]
    pub default_auto_session: bool,

    /// Emit `abstract class Abstract<Class>Spec` instead of `<Class>Spec`
    #[serde(default = "default_abstract_spec")]
    pub abstract_spec: bool,

    /// Overwrite existing files
    #[serde(default = "default_force")]
    pub force: bool,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(skip, default = "name_fn::default_table_name_to_class_name")]
    pub table_name_to_class_name: NameFn,

    #[serde(skip, default = "name_fn::default_column_name_to_field_name")]
    pub column_name_to_field_name: NameFn,

    #[serde(skip, default = "name_fn::default_table_name_to_syntax_name")]
    pub table_name_to_syntax_name: NameFn,

    #[serde(skip, default = "name_fn::default_table_name_to_syntax_variable_name")]
    pub table_name_to_syntax_variable_name: NameFn,
}

// Default value functions for serde
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_src_dir() -> PathBuf {
    PathBuf::from(defaults::SRC_DIR)
}
fn default_test_dir() -> PathBuf {
    PathBuf::from(defaults::TEST_DIR)
}
fn default_package_name() -> String {
    defaults::PACKAGE_NAME.to_string()
}
fn default_test_template() -> String {
    defaults::TEST_TEMPLATE.to_string()
}
fn default_case_class_only() -> bool {
    defaults::CASE_CLASS_ONLY
}
fn default_auto_construct() -> bool {
    defaults::AUTO_CONSTRUCT
}
fn default_default_auto_session() -> bool {
    defaults::DEFAULT_AUTO_SESSION
}
fn default_abstract_spec() -> bool {
    defaults::ABSTRACT_SPEC
}
fn default_force() -> bool {
    defaults::FORCE
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            include_tables: default_include_tables(),
            src_dir: default_src_dir(),
            test_dir: default_test_dir(),
            package_name: default_package_name(),
            template: GeneratorTemplate::default(),
            test_template: default_test_template(),
            return_collection_type: ReturnCollectionType::default(),
            date_time_class: DateTimeClass::default(),
            line_break: LineBreak::default(),
            table_names_to_skip: Vec::new(),
            base_types: Vec::new(),
            companion_base_types: Vec::new(),
            spec_base_types: Vec::new(),
            extra_imports: Vec::new(),
            type_mapping_by_column: Vec::new(),
            type_mapping_by_jdbc_type_name: BTreeMap::new(),
            default_value_by_type: BTreeMap::new(),
            case_class_only: default_case_class_only(),
            auto_construct: default_auto_construct(),
            default_auto_session: default_default_auto_session(),
            abstract_spec: default_abstract_spec(),
            force: default_force(),
            dry_run: default_dry_run(),
            log_level: None,
            table_name_to_class_name: name_fn::default_table_name_to_class_name(),
            column_name_to_field_name: name_fn::default_column_name_to_field_name(),
            table_name_to_syntax_name: name_fn::default_table_name_to_syntax_name(),
            table_name_to_syntax_variable_name:
                name_fn::default_table_name_to_syntax_variable_name(),
        }
    }
}

impl GeneratorConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("mapper-codegen").required(false));
        }

        // Override with environment variables (MAPPER_CODEGEN_*)
        builder = builder.add_source(
            Environment::with_prefix("MAPPER_CODEGEN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: GeneratorConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Look up an exact `(class, field)` type override
    pub fn type_override_for_column(&self, class_name: &str, field_name: &str) -> Option<&str> {
        self.type_mapping_by_column
            .iter()
            .find(|o| o.class_name == class_name && o.field_name == field_name)
            .map(|o| o.type_name.as_str())
    }

    /// Look up a JDBC type name override (case-insensitive)
    pub fn type_override_for_jdbc_type_name(&self, jdbc_type_name: &str) -> Option<&str> {
        self.type_mapping_by_jdbc_type_name
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(jdbc_type_name))
            .map(|(_, type_name)| type_name.as_str())
    }

    /// `com.example` -> `com/example`
    pub fn package_path(&self) -> PathBuf {
        self.package_name.split('.').collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if !self.schema_file.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        self.validate_package_name()
    }

    /// Check that `package_name` is a dotted list of Scala identifiers
    pub fn validate_package_name(&self) -> Result<()> {
        let valid = !self.package_name.is_empty()
            && self.package_name.split('.').all(|segment| {
                let mut chars = segment.chars();
                matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if valid {
            Ok(())
        } else {
            Err(CodegenError::ValidationError(format!(
                "invalid package_name: {:?}",
                self.package_name
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.include_tables, "*");
        assert_eq!(config.package_name, "models");
        assert_eq!(config.template, GeneratorTemplate::QueryDsl);
        assert_eq!(config.test_template, "ScalaTestFlatSpec");
        assert!(config.default_auto_session);
        assert!(config.log_level.is_none());
        assert_eq!(config.table_name_to_class_name.apply("member_group"), "MemberGroup");
    }

    #[test]
    fn test_validation_missing_schema() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_package_name() {
        let mut config = GeneratorConfig::default();
        config.package_name = "com.example.models".into();
        assert!(config.validate_package_name().is_ok());
        config.package_name = "com..example".into();
        assert!(config.validate_package_name().is_err());
        config.package_name = "1com".into();
        assert!(config.validate_package_name().is_err());
    }

    #[test]
    fn test_package_path() {
        let mut config = GeneratorConfig::default();
        config.package_name = "com.example".into();
        assert_eq!(config.package_path(), PathBuf::from("com").join("example"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            schema_file = "schema.json"
            package_name = "com.example"
            template = "interpolation"
            test_template = "specs2unit"
            return_collection_type = "vector"
            date_time_class = "JodaDateTime"
            line_break = "CRLF"
            log_level = "debug"

            [type_mapping_by_jdbc_type_name]
            uuid = "java.util.UUID"

            [[type_mapping_by_column]]
            class_name = "Member"
            field_name = "id"
            type_name = "MemberId"
        "#;
        let config: GeneratorConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.template, GeneratorTemplate::Interpolation);
        assert_eq!(config.return_collection_type, ReturnCollectionType::Vector);
        assert_eq!(config.date_time_class, DateTimeClass::JodaDateTime);
        assert_eq!(config.line_break, LineBreak::Crlf);
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert_eq!(config.type_override_for_jdbc_type_name("UUID"), Some("java.util.UUID"));
        assert_eq!(config.type_override_for_column("Member", "id"), Some("MemberId"));
        assert_eq!(config.type_override_for_column("Member", "name"), None);
        // naming functions fall back to their defaults
        assert_eq!(config.column_name_to_field_name.apply("created_at"), "createdAt");
    }

    #[test]
    fn test_custom_naming_function() {
        let config = GeneratorConfig {
            table_name_to_class_name: NameFn::new(|t| {
                format!("{}Row", crate::codegen::naming::table_name_to_class_name(t))
            }),
            ..Default::default()
        };
        assert_eq!(config.table_name_to_class_name.apply("emp"), "EmpRow");
        // other policies are untouched
        assert_eq!(config.table_name_to_syntax_name.apply("emp"), "e");
    }
}
