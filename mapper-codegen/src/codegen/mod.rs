//! Code generation module

mod arbitrary_generator;
mod code_generator;
mod context;
mod default_value;
mod model_generator;
pub mod naming;
mod spec_generator;
pub mod template;
mod type_resolver;
mod writer;

pub use arbitrary_generator::{generate_arbitrary, MAX_GROUP_ARITY};
pub use code_generator::*;
pub use context::{ScalaColumn, TableContext};
pub use default_value::{default_value, sample_value, NULL_LITERAL};
pub use model_generator::generate_model;
pub use spec_generator::{generate_spec, spec_class_name, TestTemplate};
pub use type_resolver::*;
pub use writer::*;
