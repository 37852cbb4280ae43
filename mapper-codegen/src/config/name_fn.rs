//! Replaceable naming functions stored in the configuration

use std::fmt;
use std::sync::Arc;

use crate::codegen::naming;

/// A naming policy (`&str -> String`) that callers can swap out
#[derive(Clone)]
pub struct NameFn(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl NameFn {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn apply(&self, name: &str) -> String {
        (self.0)(name)
    }
}

impl fmt::Debug for NameFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NameFn(..)")
    }
}

pub(crate) fn default_table_name_to_class_name() -> NameFn {
    NameFn::new(naming::table_name_to_class_name)
}

pub(crate) fn default_column_name_to_field_name() -> NameFn {
    NameFn::new(naming::column_name_to_field_name)
}

pub(crate) fn default_table_name_to_syntax_name() -> NameFn {
    NameFn::new(naming::table_name_to_syntax_name)
}

pub(crate) fn default_table_name_to_syntax_variable_name() -> NameFn {
    NameFn::new(naming::table_name_to_syntax_variable_name)
}
