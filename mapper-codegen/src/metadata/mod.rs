//! Table metadata consumed by the generators

pub mod jdbc_types;
mod schema_file;
mod table;

pub use schema_file::*;
pub use table::*;
