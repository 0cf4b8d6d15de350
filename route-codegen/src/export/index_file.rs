//! Module `Index.ets`: make sure it re-exports the generated builder.

use crate::errors::{Result, io_err};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Append `export_line` to `<module>/Index.ets` unless it is already there. Creates the file when
/// missing. Returns whether the file changed.
pub fn ensure_index_export(module_path: &Path, export_line: &str) -> Result<bool> {
    let path = module_path.join("Index.ets");
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(io_err(&path)(e)),
    };

    if content.contains(export_line) {
        debug!(path = %path.display(), "index: export already present");
        return Ok(false);
    }

    let updated = format!("{content}\n{export_line}");
    fs::write(&path, updated).map_err(io_err(&path))?;
    info!(path = %path.display(), "index: added builder export");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LINE: &str = "export * from './gen/RouterBuilder';";

    #[test]
    fn creates_missing_index() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_index_export(dir.path(), LINE).unwrap());
        let text = fs::read_to_string(dir.path().join("Index.ets")).unwrap();
        assert_eq!(text, format!("\n{LINE}"));
    }

    #[test]
    fn appends_once() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Index.ets"),
            "export { Foo } from './src/Foo';",
        )
        .unwrap();

        assert!(ensure_index_export(dir.path(), LINE).unwrap());
        assert!(!ensure_index_export(dir.path(), LINE).unwrap());

        let text = fs::read_to_string(dir.path().join("Index.ets")).unwrap();
        assert_eq!(text.matches(LINE).count(), 1);
        assert!(text.starts_with("export { Foo }"));
    }
}
