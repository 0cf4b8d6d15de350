//! Data model shared by the visitor, the resolvers and callers of [`crate::scan`].

pub mod literal;
pub mod query;
pub mod result;

pub use literal::Literal;
pub use query::ScanQuery;
pub use result::{AnalyzeResult, DEFAULT_ROUTE_PARAM_NAME};
