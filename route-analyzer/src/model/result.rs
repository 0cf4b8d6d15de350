//! One discovered route-bearing declaration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameter name used when the decorator does not name one.
pub const DEFAULT_ROUTE_PARAM_NAME: &str = "routerParam";

/// Route metadata for a single decorated component.
///
/// Only produced once `route_name` resolved to a non-empty string; never mutated after it is
/// appended to the scan output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    /// Resolved primary decorator argument, e.g. `"login/PasswordLogin"`.
    pub route_name: String,
    /// Identifier of the decorated `struct` / `class`.
    pub component_name: String,
    /// File the declaration was found in, as passed to the scan.
    pub source_file_path: PathBuf,
    pub requires_login: bool,
    pub has_route_param: bool,
    pub route_param_name: String,
}
