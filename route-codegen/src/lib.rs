//! Route registration generator for ArkTS modules.
//!
//! For every configured scan file the `@AppRouter` declarations are collected with
//! [`route_analyzer`], then three artifacts are written under the module root:
//! - `<builderDir>/<builderFileName>` with one `@Builder` function per route;
//! - `<routerMapDir>/route_map.json`, the system route table;
//! - an `export * from` line in `Index.ets` for non-entry modules.

pub mod config;
pub mod errors;
pub mod export;
mod generate;
pub mod model;

pub use config::{GeneratorConfig, SCAN_FILES_ENV};
pub use errors::{CodegenError, Result};
pub use generate::{GenerationSummary, generate, generate_with};
pub use model::{RouteEntry, RouterItem, RouterMap, RouterMetadata};
