//! Configuration for mapper-codegen

pub mod defaults;
mod name_fn;
mod options;
mod settings;

pub use name_fn::NameFn;
pub use options::*;
pub use settings::GeneratorConfig;
