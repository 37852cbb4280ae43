//! JDBC to Scala type mapping

use crate::config::{DateTimeClass, GeneratorConfig};
use crate::metadata::{jdbc_types, Column};

use super::naming;

/// Represents a Scala type for code generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalaType {
    /// Untyped marker for columns with no known mapping
    Any,
    AnyArray,
    ByteArray,
    Long,
    Int,
    Short,
    Byte,
    Float,
    Double,
    Boolean,
    String,
    BigDecimal,
    LocalDate,
    LocalTime,
    DateTime(DateTimeClass),
    Blob,
    Clob,
    Ref,
    Struct,
    /// A type named by an override that the generator knows nothing about
    Custom(String),
    /// Optional wrapper
    Option(Box<ScalaType>),
}

impl ScalaType {
    /// Get the type string for code generation
    pub fn to_type_string(&self) -> String {
        match self {
            ScalaType::Any => "Any".to_string(),
            ScalaType::AnyArray => "Array[Any]".to_string(),
            ScalaType::ByteArray => "Array[Byte]".to_string(),
            ScalaType::Long => "Long".to_string(),
            ScalaType::Int => "Int".to_string(),
            ScalaType::Short => "Short".to_string(),
            ScalaType::Byte => "Byte".to_string(),
            ScalaType::Float => "Float".to_string(),
            ScalaType::Double => "Double".to_string(),
            ScalaType::Boolean => "Boolean".to_string(),
            ScalaType::String => "String".to_string(),
            ScalaType::BigDecimal => "BigDecimal".to_string(),
            ScalaType::LocalDate => "LocalDate".to_string(),
            ScalaType::LocalTime => "LocalTime".to_string(),
            ScalaType::DateTime(class) => class.simple_name().to_string(),
            ScalaType::Blob => "Blob".to_string(),
            ScalaType::Clob => "Clob".to_string(),
            ScalaType::Ref => "Ref".to_string(),
            ScalaType::Struct => "Struct".to_string(),
            ScalaType::Custom(name) => name.clone(),
            ScalaType::Option(inner) => format!("Option[{}]", inner.to_type_string()),
        }
    }

    /// Parse a type name given by an override, recognising the built-in names
    pub fn from_name(name: &str) -> ScalaType {
        let name = name.trim();
        if let Some(inner) = name
            .strip_prefix("Option[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return ScalaType::Option(Box::new(ScalaType::from_name(inner)));
        }
        match name {
            "Any" => ScalaType::Any,
            "Array[Any]" => ScalaType::AnyArray,
            "Array[Byte]" => ScalaType::ByteArray,
            "Long" => ScalaType::Long,
            "Int" => ScalaType::Int,
            "Short" => ScalaType::Short,
            "Byte" => ScalaType::Byte,
            "Float" => ScalaType::Float,
            "Double" => ScalaType::Double,
            "Boolean" => ScalaType::Boolean,
            "String" => ScalaType::String,
            "BigDecimal" => ScalaType::BigDecimal,
            "LocalDate" => ScalaType::LocalDate,
            "LocalTime" => ScalaType::LocalTime,
            "ZonedDateTime" => ScalaType::DateTime(DateTimeClass::ZonedDateTime),
            "OffsetDateTime" => ScalaType::DateTime(DateTimeClass::OffsetDateTime),
            "LocalDateTime" => ScalaType::DateTime(DateTimeClass::LocalDateTime),
            "DateTime" => ScalaType::DateTime(DateTimeClass::JodaDateTime),
            "Blob" => ScalaType::Blob,
            "Clob" => ScalaType::Clob,
            "Ref" => ScalaType::Ref,
            "Struct" => ScalaType::Struct,
            other => ScalaType::Custom(other.to_string()),
        }
    }

    /// Get the inner type if this is an Option
    pub fn inner_type(&self) -> &ScalaType {
        match self {
            ScalaType::Option(inner) => inner,
            _ => self,
        }
    }

    /// Check if this is an Option type
    pub fn is_optional(&self) -> bool {
        matches!(self, ScalaType::Option(_))
    }

    /// `Any` or `Option[Any]`: values that need explicit binder wiring
    pub fn is_any(&self) -> bool {
        matches!(self.inner_type(), ScalaType::Any)
    }

    pub fn is_string(&self) -> bool {
        matches!(self.inner_type(), ScalaType::String)
    }

    /// `java.sql` class this type needs imported
    pub fn java_sql_import(&self) -> Option<&'static str> {
        match self.inner_type() {
            ScalaType::Blob => Some("Blob"),
            ScalaType::Clob => Some("Clob"),
            ScalaType::Ref => Some("Ref"),
            ScalaType::Struct => Some("Struct"),
            _ => None,
        }
    }

    /// Date-time class this type needs imported, as `(package, simple name)`
    pub fn time_import(
        &self,
        date_time_class: DateTimeClass,
    ) -> Option<(&'static str, &'static str)> {
        let family = date_time_class.family().package();
        match self.inner_type() {
            ScalaType::LocalDate => Some((family, "LocalDate")),
            ScalaType::LocalTime => Some((family, "LocalTime")),
            ScalaType::DateTime(class) => Some((class.family().package(), class.simple_name())),
            _ => None,
        }
    }
}

/// Resolve JDBC column types to Scala types
pub struct TypeResolver<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> TypeResolver<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Get the Scala type for a column, wrapped in `Option` when nullable
    pub fn resolve(&self, column: &Column, class_name: &str) -> ScalaType {
        let base_type = self.raw_type(column, class_name);

        if column.is_not_null {
            base_type
        } else {
            ScalaType::Option(Box::new(base_type))
        }
    }

    /// Resolve the base type (without Option wrapper). The first lookup that
    /// matches wins; `Any` when none does.
    pub fn raw_type(&self, column: &Column, class_name: &str) -> ScalaType {
        let field_name = self.config.column_name_to_field_name.apply(&column.name);
        let lookups: [&dyn Fn() -> Option<ScalaType>; 3] = [
            &|| {
                self.config
                    .type_override_for_column(class_name, naming::unquote(&field_name))
                    .map(ScalaType::from_name)
            },
            &|| {
                self.config
                    .type_override_for_jdbc_type_name(&column.jdbc_type_name)
                    .map(ScalaType::from_name)
            },
            &|| self.by_jdbc_code(column.jdbc_type_code),
        ];

        lookups
            .iter()
            .find_map(|lookup| lookup())
            .unwrap_or(ScalaType::Any)
    }

    /// Built-in mapping from `java.sql.Types` codes
    fn by_jdbc_code(&self, code: i32) -> Option<ScalaType> {
        let scala_type = match code {
            jdbc_types::ARRAY => ScalaType::AnyArray,
            jdbc_types::BIGINT => ScalaType::Long,
            jdbc_types::BINARY | jdbc_types::VARBINARY | jdbc_types::LONGVARBINARY => {
                ScalaType::ByteArray
            }
            jdbc_types::BIT | jdbc_types::BOOLEAN => ScalaType::Boolean,
            jdbc_types::BLOB => ScalaType::Blob,
            jdbc_types::CHAR
            | jdbc_types::VARCHAR
            | jdbc_types::LONGVARCHAR
            | jdbc_types::NCHAR
            | jdbc_types::NVARCHAR
            | jdbc_types::LONGNVARCHAR => ScalaType::String,
            jdbc_types::CLOB | jdbc_types::NCLOB => ScalaType::Clob,
            jdbc_types::DATE => ScalaType::LocalDate,
            jdbc_types::DECIMAL | jdbc_types::NUMERIC => ScalaType::BigDecimal,
            jdbc_types::DOUBLE => ScalaType::Double,
            jdbc_types::FLOAT | jdbc_types::REAL => ScalaType::Float,
            jdbc_types::INTEGER => ScalaType::Int,
            jdbc_types::REF => ScalaType::Ref,
            jdbc_types::SMALLINT => ScalaType::Short,
            jdbc_types::STRUCT => ScalaType::Struct,
            jdbc_types::TIME | jdbc_types::TIME_WITH_TIMEZONE => ScalaType::LocalTime,
            jdbc_types::TIMESTAMP | jdbc_types::TIMESTAMP_WITH_TIMEZONE => {
                ScalaType::DateTime(self.config.date_time_class)
            }
            jdbc_types::TINYINT => ScalaType::Byte,
            _ => return None,
        };
        Some(scala_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnTypeOverride;

    fn make_column(name: &str, code: i32, not_null: bool) -> Column {
        let column = Column::new(name, code);
        if not_null {
            column.not_null()
        } else {
            column
        }
    }

    #[test]
    fn test_integral_types() {
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&config);
        let col = make_column("id", jdbc_types::BIGINT, true);
        assert_eq!(resolver.resolve(&col, "Emp"), ScalaType::Long);
        let col = make_column("n", jdbc_types::INTEGER, true);
        assert_eq!(resolver.resolve(&col, "Emp"), ScalaType::Int);
        let col = make_column("n", jdbc_types::SMALLINT, true);
        assert_eq!(resolver.resolve(&col, "Emp"), ScalaType::Short);
        let col = make_column("n", jdbc_types::TINYINT, true);
        assert_eq!(resolver.resolve(&col, "Emp"), ScalaType::Byte);
    }

    #[test]
    fn test_nullable_wraps_in_option() {
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&config);
        let col = make_column("bio", jdbc_types::VARCHAR, false);
        let resolved = resolver.resolve(&col, "Emp");
        assert_eq!(resolved, ScalaType::Option(Box::new(ScalaType::String)));
        assert_eq!(resolved.to_type_string(), "Option[String]");
        assert_eq!(resolver.raw_type(&col, "Emp"), ScalaType::String);
    }

    #[test]
    fn test_unknown_code_is_any() {
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&config);
        let col = make_column("payload", 424242, true);
        assert_eq!(resolver.resolve(&col, "Emp"), ScalaType::Any);
        let col = make_column("payload", jdbc_types::OTHER, false);
        let resolved = resolver.resolve(&col, "Emp");
        assert!(resolved.is_any());
        assert_eq!(resolved.to_type_string(), "Option[Any]");
    }

    #[test]
    fn test_date_time_class() {
        let config = GeneratorConfig {
            date_time_class: DateTimeClass::JodaDateTime,
            ..Default::default()
        };
        let resolver = TypeResolver::new(&config);
        let col = make_column("created_at", jdbc_types::TIMESTAMP, true);
        let resolved = resolver.resolve(&col, "Emp");
        assert_eq!(resolved.to_type_string(), "DateTime");
        assert_eq!(
            resolved.time_import(config.date_time_class),
            Some(("org.joda.time", "DateTime"))
        );
        let col = make_column("birthday", jdbc_types::DATE, true);
        assert_eq!(
            resolver.resolve(&col, "Emp").time_import(config.date_time_class),
            Some(("org.joda.time", "LocalDate"))
        );
    }

    #[test]
    fn test_override_order() {
        let mut config = GeneratorConfig::default();
        config
            .type_mapping_by_jdbc_type_name
            .insert("uuid".to_string(), "java.util.UUID".to_string());
        config.type_mapping_by_column.push(ColumnTypeOverride {
            class_name: "Emp".to_string(),
            field_name: "externalId".to_string(),
            type_name: "String".to_string(),
        });
        let resolver = TypeResolver::new(&config);

        let tag = make_column("tag", jdbc_types::OTHER, true).type_name("UUID");
        assert_eq!(
            resolver.resolve(&tag, "Emp"),
            ScalaType::Custom("java.util.UUID".to_string())
        );

        // exact column override beats the type name override
        let external = make_column("external_id", jdbc_types::OTHER, false).type_name("uuid");
        assert_eq!(
            resolver.resolve(&external, "Emp").to_type_string(),
            "Option[String]"
        );
        // other classes fall through to the type name override
        assert_eq!(
            resolver.resolve(&external, "Dept").to_type_string(),
            "Option[java.util.UUID]"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&config);
        for code in [
            jdbc_types::VARCHAR,
            jdbc_types::DECIMAL,
            jdbc_types::BLOB,
            jdbc_types::DATALINK,
        ] {
            let not_null = make_column("c", code, true);
            let nullable = make_column("c", code, false);
            let first = resolver.resolve(&not_null, "T");
            assert_eq!(first, resolver.resolve(&not_null, "T"));
            assert_eq!(
                resolver.resolve(&nullable, "T"),
                ScalaType::Option(Box::new(first))
            );
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ScalaType::from_name("Long"), ScalaType::Long);
        assert_eq!(
            ScalaType::from_name("Option[String]"),
            ScalaType::Option(Box::new(ScalaType::String))
        );
        assert_eq!(
            ScalaType::from_name("java.util.UUID").to_type_string(),
            "java.util.UUID"
        );
    }

    #[test]
    fn test_java_sql_import() {
        assert_eq!(ScalaType::Blob.java_sql_import(), Some("Blob"));
        assert_eq!(
            ScalaType::Option(Box::new(ScalaType::Clob)).java_sql_import(),
            Some("Clob")
        );
        assert_eq!(ScalaType::String.java_sql_import(), None);
    }
}
