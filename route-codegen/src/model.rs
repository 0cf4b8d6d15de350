//! Generated artifact models.

use route_analyzer::AnalyzeResult;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// One route as the builder template needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub name: String,
    pub component_name: String,
    /// Path of the component's file relative to the builder directory, `/`-separated, no `.ets`.
    pub import_path: String,
    /// `<componentName>Builder`
    pub build_function: String,
    pub has_param: bool,
    pub param_name: String,
    pub login: bool,
}

impl RouteEntry {
    pub fn from_result(result: &AnalyzeResult, builder_dir: &Path) -> Self {
        Self {
            name: result.route_name.clone(),
            component_name: result.component_name.clone(),
            import_path: import_path(builder_dir, &result.source_file_path),
            build_function: format!("{}Builder", result.component_name),
            has_param: result.has_route_param,
            param_name: result.route_param_name.clone(),
            login: result.requires_login,
        }
    }
}

/// `route_map.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterMap {
    pub router_map: Vec<RouterItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterItem {
    pub name: String,
    pub page_source_file: String,
    pub build_function: String,
    pub data: RouterMetadata,
}

/// Route metadata; flags are strings in the system route table format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterMetadata {
    pub module_name: String,
    pub login: String,
    pub has_param: String,
    pub param_name: String,
}

impl RouterItem {
    pub fn new(entry: &RouteEntry, module_name: &str, page_source_file: &str) -> Self {
        Self {
            name: entry.name.clone(),
            page_source_file: page_source_file.to_string(),
            build_function: entry.build_function.clone(),
            data: RouterMetadata {
                module_name: module_name.to_string(),
                login: entry.login.to_string(),
                has_param: entry.has_param.to_string(),
                param_name: entry.param_name.clone(),
            },
        }
    }
}

/// Relative import specifier from `from_dir` to `target`, without the `.ets` extension.
pub fn import_path(from_dir: &Path, target: &Path) -> String {
    let target = normalize(target);
    let rel = pathdiff::diff_paths(&target, normalize(from_dir)).unwrap_or(target);

    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    let joined = joined.strip_suffix(".ets").unwrap_or(&joined);
    if joined.starts_with("..") {
        joined.to_string()
    } else {
        format!("./{joined}")
    }
}

/// ArkTS/TypeScript identifier: `[A-Za-z_$][A-Za-z0-9_$]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Lexically drop `.` and fold `..` segments.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in path.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
