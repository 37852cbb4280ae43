//! Enumerated generation policies

use serde::{Deserialize, Serialize};
use std::fmt;

/// How generated methods build their SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeneratorTemplate {
    /// `sql"""select ... where ${sqls.eq(m.id, id)}"""`
    #[serde(rename = "interpolation")]
    Interpolation,
    /// `withSQL { select.from(M as m).where.eq(m.id, id) }`
    #[default]
    #[serde(rename = "queryDsl")]
    QueryDsl,
}

/// Collection type returned by multi-row queries and `batchInsert`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnCollectionType {
    #[default]
    List,
    Vector,
    Array,
    /// Caller-chosen collection through `scala.collection.Factory`
    Factory,
}

impl ReturnCollectionType {
    /// Type parameter clause placed after the method name
    pub fn type_params(&self) -> &'static str {
        match self {
            Self::Factory => "[C[_]]",
            _ => "",
        }
    }

    /// Result type holding `element`
    pub fn result_type(&self, element: &str) -> String {
        match self {
            Self::List => format!("List[{}]", element),
            Self::Vector => format!("Vector[{}]", element),
            Self::Array => format!("Array[{}]", element),
            Self::Factory => format!("C[{}]", element),
        }
    }

    /// Extra implicit parameter, if any, for the given element type
    pub fn implicit_param(&self, element: &str) -> Option<String> {
        match self {
            Self::Factory => Some(format!("factory: Factory[{element}, C[{element}]]")),
            _ => None,
        }
    }

    /// Fetch call on a mapped `SQL` value
    pub fn fetch(&self) -> &'static str {
        match self {
            Self::List => ".list.apply()",
            Self::Vector => ".collection.apply[Vector]()",
            Self::Array => ".collection.apply[Array]()",
            Self::Factory => ".collection.apply[C]()",
        }
    }

    /// Type argument for `batch(...).apply[...]()`
    pub fn batch_apply(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Vector => "Vector",
            Self::Array => "Array",
            Self::Factory => "C",
        }
    }
}

/// Which date-time family the generated code uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeFamily {
    Joda,
    JavaTime,
}

impl DateTimeFamily {
    pub fn package(&self) -> &'static str {
        match self {
            Self::Joda => "org.joda.time",
            Self::JavaTime => "java.time",
        }
    }
}

/// Scala type used for JDBC TIMESTAMP columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateTimeClass {
    #[default]
    ZonedDateTime,
    OffsetDateTime,
    LocalDateTime,
    JodaDateTime,
}

impl DateTimeClass {
    pub fn simple_name(&self) -> &'static str {
        match self {
            Self::ZonedDateTime => "ZonedDateTime",
            Self::OffsetDateTime => "OffsetDateTime",
            Self::LocalDateTime => "LocalDateTime",
            Self::JodaDateTime => "DateTime",
        }
    }

    pub fn family(&self) -> DateTimeFamily {
        match self {
            Self::JodaDateTime => DateTimeFamily::Joda,
            _ => DateTimeFamily::JavaTime,
        }
    }
}

/// Line terminator of generated files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineBreak {
    #[default]
    Lf,
    Crlf,
}

impl LineBreak {
    /// Rewrite `\n`-terminated text to this line break
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace("\r\n", "\n").replace('\n', "\r\n"),
        }
    }
}

impl fmt::Display for GeneratorTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interpolation => write!(f, "interpolation"),
            Self::QueryDsl => write!(f, "queryDsl"),
        }
    }
}

/// Exact `(class, field) -> type` override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeOverride {
    pub class_name: String,
    pub field_name: String,
    pub type_name: String,
}
