//! Sample literals for generated `create` calls and specs

use crate::config::GeneratorConfig;

use super::type_resolver::ScalaType;

/// Literal used when no sample is known
pub const NULL_LITERAL: &str = "null";

/// Sample literal for a resolved (unwrapped) type: config override first,
/// then the built-in table, then `null`
pub fn default_value(raw_type: &ScalaType, config: &GeneratorConfig) -> String {
    if let Some(value) = config.default_value_by_type.get(&raw_type.to_type_string()) {
        return value.clone();
    }
    builtin_default_value(raw_type)
        .unwrap_or_else(|| NULL_LITERAL.to_string())
}

fn builtin_default_value(raw_type: &ScalaType) -> Option<String> {
    let literal = match raw_type {
        ScalaType::Long => "1L".to_string(),
        ScalaType::Int | ScalaType::Short => "123".to_string(),
        ScalaType::Byte => "1".to_string(),
        ScalaType::Double => "0.1D".to_string(),
        ScalaType::Float => "0.1F".to_string(),
        ScalaType::Boolean => "false".to_string(),
        ScalaType::String => "\"MyString\"".to_string(),
        ScalaType::BigDecimal => "BigDecimal(\"1\")".to_string(),
        ScalaType::ByteArray => "Array[Byte]()".to_string(),
        ScalaType::AnyArray => "Array[Any]()".to_string(),
        ScalaType::LocalDate => "LocalDate.now".to_string(),
        ScalaType::LocalTime => "LocalTime.now".to_string(),
        ScalaType::DateTime(class) => format!("{}.now", class.simple_name()),
        _ => return None,
    };
    Some(literal)
}

/// Sample value for a field of `field_type`: `Some(..)` for optional fields,
/// `None` when the wrapped literal would be `null`
pub fn sample_value(field_type: &ScalaType, config: &GeneratorConfig) -> String {
    let literal = default_value(field_type.inner_type(), config);
    if !field_type.is_optional() {
        literal
    } else if literal == NULL_LITERAL {
        "None".to_string()
    } else {
        format!("Some({})", literal)
    }
}
