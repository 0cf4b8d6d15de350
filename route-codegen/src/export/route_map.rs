//! `route_map.json` writer (tab-indented, like the system route table files).

use crate::errors::{Result, io_err};
use crate::model::RouterMap;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;
use tracing::info;

/// File name inside `routerMapDir`.
pub const ROUTE_MAP_FILE: &str = "route_map.json";

pub fn render_route_map(map: &RouterMap) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    map.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `map` to `<dir>/route_map.json`, creating `dir` if needed.
pub fn write_route_map(dir: &Path, map: &RouterMap) -> Result<()> {
    fs::create_dir_all(dir).map_err(io_err(dir))?;
    let path = dir.join(ROUTE_MAP_FILE);
    fs::write(&path, render_route_map(map)?).map_err(io_err(&path))?;
    info!(path = %path.display(), routes = map.router_map.len(), "route_map: wrote");
    Ok(())
}
