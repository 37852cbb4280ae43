//! Default configuration values - single source of truth

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default source directory for model files
pub const SRC_DIR: &str = "src/main/scala";

/// Default source directory for spec and arbitrary files
pub const TEST_DIR: &str = "src/test/scala";

/// Default package for generated code
pub const PACKAGE_NAME: &str = "models";

/// Default test template identifier
pub const TEST_TEMPLATE: &str = "ScalaTestFlatSpec";

/// Suffix appended to field names that clash with record methods
pub const CONFLICT_SUFFIX: &str = "Column";

/// Syntax alias used when the derived one is unusable
pub const FALLBACK_SYNTAX_NAME: &str = "x";

/// Whether implicit session parameters default to `autoSession`
pub const DEFAULT_AUTO_SESSION: bool = true;

/// Whether to emit only the case class
pub const CASE_CLASS_ONLY: bool = false;

/// Whether extractors use `autoConstruct`
pub const AUTO_CONSTRUCT: bool = false;

/// Whether specs are emitted as abstract classes
pub const ABSTRACT_SPEC: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Whether conditional writes overwrite by default
pub const FORCE: bool = false;
