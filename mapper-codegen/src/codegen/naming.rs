//! Naming utilities for code generation

use heck::ToLowerCamelCase;

use crate::config::defaults;

/// Scala reserved words (Scala 2 plus the Scala 3 hard keywords)
const SCALA_RESERVED_WORDS: &[&str] = &[
    "abstract", "case", "catch", "class", "def", "do", "else", "enum", "export", "extends",
    "false", "final", "finally", "for", "forSome", "given", "if", "implicit", "import", "lazy",
    "macro", "match", "new", "null", "object", "override", "package", "private", "protected",
    "return", "sealed", "super", "then", "this", "throw", "trait", "true", "try", "type", "val",
    "var", "while", "with", "yield",
];

/// Methods every generated case class carries
const RECORD_METHOD_NAMES: &[&str] = &[
    "copy",
    "hashCode",
    "toString",
    "equals",
    "canEqual",
    "productArity",
    "productElement",
    "productIterator",
    "productPrefix",
    "getClass",
    "wait",
    "notify",
    "notifyAll",
    "clone",
    "finalize",
    "save",
    "destroy",
];

/// Identifiers the generated companion object declares or uses
const GENERATOR_RESERVED_NAMES: &[&str] = &[
    "rs",
    "rn",
    "sp",
    "ps",
    "i",
    "column",
    "session",
    "entity",
    "entities",
    "params",
    "where",
    "generatedKey",
    "factory",
    "autoSession",
];

/// Check if a name is a Scala reserved word
pub fn is_scala_reserved_word(name: &str) -> bool {
    SCALA_RESERVED_WORDS.contains(&name)
}

pub fn is_record_method_name(name: &str) -> bool {
    RECORD_METHOD_NAMES.contains(&name)
}

/// Check if a name is declared or used by the generated companion object
pub fn is_generator_reserved_name(name: &str) -> bool {
    GENERATOR_RESERVED_NAMES.contains(&name)
}

/// Upper-case the first character, lower-case the rest
fn to_proper_case(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `member_group` -> `MemberGroup`, `USER_ID` -> `UserId`
pub fn to_camel_case(name: &str) -> String {
    name.split('_').map(to_proper_case).collect()
}

/// `member_group` -> `memberGroup`, without any escaping
pub fn to_field_name_basic(column_name: &str) -> String {
    let camel = to_camel_case(column_name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wrap a reserved word in backticks
pub fn quote_reserved_word(name: &str) -> String {
    if is_scala_reserved_word(name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

/// Append `suffix` when `name` clashes with a record method or a generated identifier
pub fn add_suffix_if_conflict(name: &str, suffix: &str) -> String {
    if is_record_method_name(name) || is_generator_reserved_name(name) {
        format!("{}{}", name, suffix)
    } else {
        name.to_string()
    }
}

/// Strip the backticks added by [`quote_reserved_word`]
pub fn unquote(identifier: &str) -> &str {
    identifier
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
        .unwrap_or(identifier)
}

/// Default column -> field mapping: camel case, then quoting, then conflict suffix
pub fn column_name_to_field_name(column_name: &str) -> String {
    let name = to_field_name_basic(column_name);
    if is_scala_reserved_word(&name) {
        quote_reserved_word(&name)
    } else {
        add_suffix_if_conflict(&name, defaults::CONFLICT_SUFFIX)
    }
}

/// Default table -> class mapping
pub fn table_name_to_class_name(table_name: &str) -> String {
    to_camel_case(table_name)
}

/// Default syntax alias: the class name's capitals, lower-cased (`MemberGroup` -> `mg`)
pub fn table_name_to_syntax_name(table_name: &str) -> String {
    let name: String = table_name_to_class_name(table_name)
        .chars()
        .filter(char::is_ascii_uppercase)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if name.is_empty() || is_generator_reserved_name(&name) {
        defaults::FALLBACK_SYNTAX_NAME.to_string()
    } else {
        name
    }
}

/// Default syntax variable: the syntax alias, quoted when it is a reserved word
pub fn table_name_to_syntax_variable_name(table_name: &str) -> String {
    quote_reserved_word(&table_name_to_syntax_name(table_name))
}

/// `MemberGroup` -> `memberGroup`, used for generator value names
pub fn to_value_name(class_name: &str) -> String {
    let name = class_name.to_lower_camel_case();
    quote_reserved_word(&name)
}
