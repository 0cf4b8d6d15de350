//! `RouterBuilder.ets` writer.
//!
//! Layout of the generated file:
//!   header comment
//!   router library import
//!   one import per component source file (components in first-seen order)
//!   one `@Builder` function per route
//!   `registerRoutes()` registering every builder under its route name

use crate::errors::{CodegenError, Result, io_err};
use crate::model::{RouteEntry, is_identifier};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Render the builder source for `routes`.
///
/// Fails with [`CodegenError::InvalidParamName`] when a route taking a parameter names it with
/// something other than an identifier.
pub fn render_builder(module_name: &str, lib_name: &str, routes: &[RouteEntry]) -> Result<String> {
    if let Some(bad) = routes
        .iter()
        .find(|r| r.has_param && !is_identifier(&r.param_name))
    {
        return Err(CodegenError::InvalidParamName {
            route: bad.name.clone(),
            param_name: bad.param_name.clone(),
        });
    }

    let mut out = String::new();
    writeln!(
        out,
        "// Generated by auto-router-gen for module `{module_name}`. Do not edit."
    )?;
    writeln!(out, "import {{ AppRouterRegistry }} from '{lib_name}';")?;

    let mut imports: Vec<(&str, Vec<&str>)> = Vec::new();
    for route in routes {
        let path = route.import_path.as_str();
        let component = route.component_name.as_str();
        match imports.iter_mut().find(|(p, _)| *p == path) {
            Some((_, names)) => {
                if !names.contains(&component) {
                    names.push(component);
                }
            }
            None => imports.push((path, vec![component])),
        }
    }
    for (path, names) in &imports {
        writeln!(out, "import {{ {} }} from '{path}';", names.join(", "))?;
    }

    for route in routes {
        out.push('\n');
        writeln!(out, "@Builder")?;
        if route.has_param {
            writeln!(
                out,
                "export function {}({}: ESObject) {{",
                route.build_function, route.param_name
            )?;
            writeln!(
                out,
                "  {}({{ {}: {} }})",
                route.component_name, route.param_name, route.param_name
            )?;
        } else {
            writeln!(out, "export function {}() {{", route.build_function)?;
            writeln!(out, "  {}()", route.component_name)?;
        }
        writeln!(out, "}}")?;
    }

    out.push('\n');
    writeln!(out, "export function registerRoutes(): void {{")?;
    for route in routes {
        writeln!(
            out,
            "  AppRouterRegistry.register('{}', wrapBuilder({}), {});",
            escape_single_quoted(&route.name),
            route.build_function,
            route.login
        )?;
    }
    writeln!(out, "}}")?;
    Ok(out)
}

/// Write the rendered builder to `path`, creating parent directories.
pub fn write_builder(path: &Path, source: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err(dir))?;
    }
    fs::write(path, source).map_err(io_err(path))?;
    info!(path = %path.display(), "builder: wrote");
    Ok(())
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
