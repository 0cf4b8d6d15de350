//! Full generation runs over fixture modules.

use route_codegen::{GeneratorConfig, generate};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

fn module_fixture(root: &Path) {
    write(
        root,
        "src/main/ets/common/RouteNames.ets",
        r#"
export class RouteNames {
  static readonly LOGIN: string = "login/Password";
}
"#,
    );
    write(
        root,
        "src/main/ets/pages/Login.ets",
        r#"
import { RouteNames } from '../common/RouteNames';

@AppRouter({ name: RouteNames.LOGIN, login: true })
export class PasswordLogin {}
"#,
    );
    write(
        root,
        "src/main/ets/pages/Detail.ets",
        r#"
@AppRouter({ name: "detail/Item", hasParam: true, paramName: "item" })
export class ItemDetail {}
"#,
    );
}

fn config(root: &Path) -> GeneratorConfig {
    GeneratorConfig {
        module_name: "home".into(),
        module_path: root.to_path_buf(),
        scan_files: vec![
            "src/main/ets/pages/Login".into(),
            "src/main/ets/pages/Detail.ets".into(),
            "src/main/ets/pages/Missing".into(),
        ],
        ..Default::default()
    }
}

#[test]
fn writes_builder_route_map_and_index() {
    let dir = TempDir::new().unwrap();
    module_fixture(dir.path());
    let cfg = config(dir.path());

    let summary = generate(&cfg).unwrap();
    assert_eq!(summary.scanned_files, 3);
    assert_eq!(summary.skipped_files.len(), 1);
    assert_eq!(summary.routes.len(), 2);
    assert!(summary.index_updated);

    let login = &summary.routes[0];
    assert_eq!(login.name, "login/Password");
    assert_eq!(login.import_path, "../pages/Login");
    assert_eq!(login.build_function, "PasswordLoginBuilder");
    assert!(login.login);

    let builder = fs::read_to_string(
        dir.path()
            .join("src/main/ets/auto_router_generated/RouterBuilder.ets"),
    )
    .unwrap();
    assert!(builder.contains("import { PasswordLogin } from '../pages/Login';"));
    assert!(builder.contains("import { ItemDetail } from '../pages/Detail';"));
    assert!(builder.contains("export function ItemDetailBuilder(item: ESObject) {"));

    let map_text = fs::read_to_string(
        dir.path()
            .join("src/main/resources/base/profile/route_map.json"),
    )
    .unwrap();
    let map: serde_json::Value = serde_json::from_str(&map_text).unwrap();
    let items = map["routerMap"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "login/Password");
    assert_eq!(
        items[0]["pageSourceFile"],
        "src/main/ets/auto_router_generated/RouterBuilder.ets"
    );
    assert_eq!(items[0]["data"]["moduleName"], "home");
    assert_eq!(items[0]["data"]["login"], "true");
    assert_eq!(items[1]["data"]["hasParam"], "true");
    assert_eq!(items[1]["data"]["paramName"], "item");

    let index = fs::read_to_string(dir.path().join("Index.ets")).unwrap();
    assert!(index.contains("export * from './src/main/ets/auto_router_generated/RouterBuilder';"));
}

#[test]
fn second_run_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    module_fixture(dir.path());
    let cfg = config(dir.path());

    let read_all = |root: &Path| {
        [
            "src/main/ets/auto_router_generated/RouterBuilder.ets",
            "src/main/resources/base/profile/route_map.json",
            "Index.ets",
        ]
        .map(|rel| fs::read(root.join(rel)).unwrap())
    };

    generate(&cfg).unwrap();
    let first = read_all(dir.path());
    let summary = generate(&cfg).unwrap();
    let second = read_all(dir.path());

    assert!(!summary.index_updated);
    assert_eq!(first, second);
}

#[test]
fn main_target_leaves_index_alone() {
    let dir = TempDir::new().unwrap();
    module_fixture(dir.path());
    let cfg = GeneratorConfig {
        main_target: true,
        ..config(dir.path())
    };

    let summary = generate(&cfg).unwrap();
    assert!(!summary.index_updated);
    assert!(!dir.path().join("Index.ets").exists());
}

#[test]
fn no_scan_files_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let cfg = GeneratorConfig {
        module_name: "empty".into(),
        module_path: dir.path().to_path_buf(),
        ..Default::default()
    };

    let summary = generate(&cfg).unwrap();
    assert!(summary.routes.is_empty());
    assert!(summary.builder_file.is_none());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn config_file_paths_are_relative_to_the_file() {
    let dir = TempDir::new().unwrap();
    module_fixture(&dir.path().join("home"));
    let cfg_path = write(
        dir.path(),
        "router.json5",
        r#"{
  moduleName: "home",
  modulePath: "home",
  scanFiles: ["src/main/ets/pages/Detail"],
}"#,
    );

    let cfg = GeneratorConfig::load_from_file(&cfg_path).unwrap();
    assert_eq!(cfg.module_path, dir.path().join("home"));

    let summary = generate(&cfg).unwrap();
    assert_eq!(summary.routes.len(), 1);
    assert_eq!(summary.routes[0].component_name, "ItemDetail");
}

#[test]
fn route_with_non_identifier_param_name_is_skipped() {
    let dir = TempDir::new().unwrap();
    module_fixture(dir.path());
    write(
        dir.path(),
        "src/main/ets/pages/Bad.ets",
        r#"
@AppRouter({ name: "bad/Page", hasParam: true, paramName: "item-id" })
export class BadPage {}
"#,
    );
    let cfg = GeneratorConfig {
        scan_files: vec![
            "src/main/ets/pages/Bad".into(),
            "src/main/ets/pages/Detail".into(),
        ],
        ..config(dir.path())
    };

    let summary = generate(&cfg).unwrap();
    let names: Vec<_> = summary.routes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["detail/Item"]);

    let builder = fs::read_to_string(
        dir.path()
            .join("src/main/ets/auto_router_generated/RouterBuilder.ets"),
    )
    .unwrap();
    assert!(!builder.contains("BadPage"));
}
