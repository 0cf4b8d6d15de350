//! Writers for the generated artifacts.

pub mod builder;
pub mod index_file;
pub mod route_map;
