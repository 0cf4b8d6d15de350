//! Static extraction of `@AppRouter` route metadata from ArkTS / TypeScript sources.
//!
//! [`scan`] walks one file, finds decorated `struct` / `class` declarations and turns the decorator
//! arguments into [`AnalyzeResult`]s. Arguments written as identifiers or `Namespace.MEMBER`
//! accesses are resolved to literals by following imports, `export ... from` redirects and
//! `oh-package.json5` dependencies into other files.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod model;
pub mod resolve;
mod scan;
pub mod syntax;

pub use config::model::{AnalyzerConfig, DecoratorConfig};
pub use errors::{AnalyzerError, ResolveError, Result};
pub use model::{AnalyzeResult, DEFAULT_ROUTE_PARAM_NAME, Literal, ScanQuery};
pub use scan::{RouteScanner, scan};
