//! File materialization for generated sources

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{CodegenError, Result};

/// Source text and the path it is destined for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedUnit {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }
}

/// Why a conditional write did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyExists,
    /// The table is listed in `table_names_to_skip`
    SkippedTable,
}

/// Result of a write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Skipped { reason: SkipReason },
    /// Dry run: the file would have been written
    WouldWrite,
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Created | Self::Overwritten)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Overwritten => write!(f, "overwritten"),
            Self::Skipped {
                reason: SkipReason::AlreadyExists,
            } => write!(f, "already exists"),
            Self::Skipped {
                reason: SkipReason::SkippedTable,
            } => write!(f, "skipped"),
            Self::WouldWrite => write!(f, "would write"),
        }
    }
}

/// Writes generated units, creating parent directories as needed
#[derive(Debug, Clone, Copy, Default)]
pub struct Writer {
    dry_run: bool,
}

impl Writer {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write the unit, replacing any existing file
    pub fn write(&self, unit: &GeneratedUnit) -> Result<WriteOutcome> {
        let existed = unit.path.exists();
        if self.dry_run {
            debug!("Dry run, not writing {}", unit.path.display());
            return Ok(WriteOutcome::WouldWrite);
        }

        if let Some(parent) = unit.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CodegenError::DirectoryCreation {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&unit.path, &unit.content)?;
        debug!("Wrote {}", unit.path.display());

        Ok(if existed {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        })
    }

    /// Write the unit unless its destination already exists
    pub fn write_if_not_exist(&self, unit: &GeneratedUnit) -> Result<WriteOutcome> {
        if unit.path.exists() {
            debug!("{} already exists", unit.path.display());
            return Ok(WriteOutcome::Skipped {
                reason: SkipReason::AlreadyExists,
            });
        }
        self.write(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/Emp.scala");
        let unit = GeneratedUnit::new(path.clone(), "case class Emp()".to_string());

        let outcome = Writer::default().write(&unit).unwrap();
        assert_eq!(outcome, WriteOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "case class Emp()");

        let outcome = Writer::default().write(&unit).unwrap();
        assert_eq!(outcome, WriteOutcome::Overwritten);
    }

    #[test]
    fn test_conditional_write_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Emp.scala");
        let writer = Writer::default();

        let first = GeneratedUnit::new(path.clone(), "first".to_string());
        assert!(writer.write_if_not_exist(&first).unwrap().is_written());

        let second = GeneratedUnit::new(path.clone(), "second".to_string());
        assert_eq!(
            writer.write_if_not_exist(&second).unwrap(),
            WriteOutcome::Skipped {
                reason: SkipReason::AlreadyExists
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models/Emp.scala");
        let unit = GeneratedUnit::new(path.clone(), "x".to_string());

        let outcome = Writer::new(true).write(&unit).unwrap();
        assert_eq!(outcome, WriteOutcome::WouldWrite);
        assert!(!path.exists());
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_directory_creation_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let unit = GeneratedUnit::new(blocker.join("Emp.scala"), "x".to_string());

        let err = Writer::default().write(&unit).unwrap_err();
        assert!(matches!(err, CodegenError::DirectoryCreation { .. }));
    }
}
