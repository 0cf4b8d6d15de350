//! Symbolic decorator arguments resolved across files, redirects and package manifests.

use route_analyzer::{AnalyzeResult, AnalyzerConfig, RouteScanner, scan};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

fn route_name(results: &[AnalyzeResult]) -> Option<&str> {
    match results {
        [r] => Some(r.route_name.as_str()),
        _ => None,
    }
}

const ROUTE_NAMES_CLASS: &str = r#"
export class RouteNames {
  static readonly LOGIN_PAGE: string = "login/Page";
  static readonly NEEDS_LOGIN: boolean = true;
}
"#;

// ============================================================================
// Relative imports
// ============================================================================

#[test]
fn imported_constant() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "constants.ets",
        "export const LOGIN_PAGE = \"login/Page\";\n",
    );
    let page = write(
        dir.path(),
        "Login.ets",
        r#"
import { LOGIN_PAGE } from './constants';

@AppRouter({ name: LOGIN_PAGE })
export class LoginPage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("login/Page"));
}

#[test]
fn class_static_member() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "RouteNames.ets", ROUTE_NAMES_CLASS);
    let page = write(
        dir.path(),
        "Login.ets",
        r#"
import { RouteNames } from './RouteNames';

@AppRouter({ name: RouteNames.LOGIN_PAGE, login: RouteNames.NEEDS_LOGIN })
export class LoginPage {}
"#,
    );
    let results = scan(&page).unwrap();
    assert_eq!(route_name(&results), Some("login/Page"));
    assert!(results[0].requires_login);
}

#[test]
fn static_member_referring_to_a_sibling() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "keys.ts",
        r#"
export class K {
  static readonly A: string = 'a/Page';
  static readonly B: string = K.A;
}
"#,
    );
    let page = write(
        dir.path(),
        "P.ets",
        r#"
import { K } from './keys';

@AppRouter({ name: K.B })
export class P {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("a/Page"));
}

#[test]
fn enum_member() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "routes.ts",
        "export enum R {\n  HOME = 'h',\n  DETAIL = 'd',\n}\n",
    );
    let page = write(
        dir.path(),
        "Detail.ets",
        r#"
import { R } from './routes';

@AppRouter({ name: R.DETAIL })
@Component
export struct DetailPage {
  build() {}
}
"#,
    );
    let results = scan(&page).unwrap();
    assert_eq!(route_name(&results), Some("d"));
    assert_eq!(results[0].component_name, "DetailPage");
}

#[test]
fn one_hop_export_redirect() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "real-constants.ets", ROUTE_NAMES_CLASS);
    write(
        dir.path(),
        "constants.ets",
        "export { RouteNames } from './real-constants';\n",
    );
    let page = write(
        dir.path(),
        "Login.ets",
        r#"
import { RouteNames } from './constants';

@AppRouter({ name: RouteNames.LOGIN_PAGE })
export class LoginPage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("login/Page"));
}

#[test]
fn multi_hop_and_renamed_redirects() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/real.ets", ROUTE_NAMES_CLASS);
    write(
        dir.path(),
        "a/index.ets",
        "export { RouteNames as Names } from './real';\n",
    );
    write(dir.path(), "b.ets", "export { Names } from './a';\n");
    let page = write(
        dir.path(),
        "Login.ets",
        r#"
import { Names as N } from './b';

@AppRouter({ name: N.LOGIN_PAGE })
export class LoginPage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("login/Page"));
}

#[test]
fn wildcard_redirect() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "names.ets", "export const HOME = 'home';\n");
    write(dir.path(), "other.ets", "export const UNRELATED = 'x';\n");
    write(
        dir.path(),
        "all.ets",
        "export * from './other';\nexport * from './names';\n",
    );
    let page = write(
        dir.path(),
        "Home.ets",
        r#"
import { HOME } from './all';

@AppRouter({ name: HOME })
export class HomePage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("home"));
}

#[test]
fn namespace_import_reads_top_level_constant() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "consts.ts",
        "export const HOME = 'home';\nexport const PARAM = 'homeArgs';\n",
    );
    let page = write(
        dir.path(),
        "Home.ets",
        r#"
import * as C from './consts';

@AppRouter({ name: C.HOME, hasParam: true, paramName: C.PARAM })
export class HomePage {}
"#,
    );
    let results = scan(&page).unwrap();
    assert_eq!(route_name(&results), Some("home"));
    assert_eq!(results[0].route_param_name, "homeArgs");
}

#[test]
fn namespace_import_through_package_named_redirect() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "m/oh-package.json5",
        r#"{ dependencies: { "@app/common": "file:../common" } }"#,
    );
    write(
        dir.path(),
        "common/Index.ets",
        "export { HOME } from './src/Consts';\n",
    );
    write(
        dir.path(),
        "common/src/Consts.ets",
        "export const HOME = 'home/Page';\n",
    );
    let page = write(
        dir.path(),
        "m/Home.ets",
        r#"
import * as C from '@app/common';

@AppRouter({ name: C.HOME })
export class A {}
"#,
    );
    let results = scan(&page).unwrap();
    assert_eq!(route_name(&results), Some("home/Page"));
    assert_eq!(results[0].component_name, "A");
}

#[test]
fn named_import_does_not_fall_back_to_top_level_constant() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "consts.ts", "export const HOME = 'home';\n");
    let page = write(
        dir.path(),
        "Home.ets",
        r#"
import { Keys } from './consts';

@AppRouter({ name: Keys.HOME })
export class HomePage {}
"#,
    );
    assert!(scan(&page).unwrap().is_empty());
}

#[test]
fn constant_aliasing_an_imported_constant() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "base.ets", "export const ROOT = 'settings';\n");
    write(
        dir.path(),
        "names.ets",
        "import { ROOT } from './base';\nexport const SETTINGS = ROOT;\n",
    );
    let page = write(
        dir.path(),
        "Settings.ets",
        r#"
import { SETTINGS } from './names';

@AppRouter({ name: SETTINGS })
export class SettingsPage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("settings"));
}

#[test]
fn same_file_constant() {
    let dir = TempDir::new().unwrap();
    let page = write(
        dir.path(),
        "Local.ets",
        r#"
const NAME = "local/Page";

@AppRouter({ name: NAME })
export class LocalPage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("local/Page"));
}

#[test]
fn non_literal_initializer_is_unresolved() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "computed.ets",
        "export const NAME = ['a', 'b'].join('/');\n",
    );
    let page = write(
        dir.path(),
        "Computed.ets",
        r#"
import { NAME } from './computed';

@AppRouter({ name: NAME })
export class ComputedPage {}
"#,
    );
    assert!(scan(&page).unwrap().is_empty());
}

#[test]
fn redirect_cycle_fails_soft() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.ets", "export { Names } from './b';\n");
    write(dir.path(), "b.ets", "export { Names } from './a';\n");
    let page = write(
        dir.path(),
        "Loop.ets",
        r#"
import { Names } from './a';

@AppRouter({ name: Names.HOME })
export class LoopPage {}

@AppRouter({ name: "after/loop" })
export class AfterLoop {}
"#,
    );
    let results = scan(&page).unwrap();
    assert_eq!(route_name(&results), Some("after/loop"));
}

#[test]
fn redirect_chain_longer_than_depth_limit_fails_soft() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "r3.ets", "export const HOME = 'deep';\n");
    write(dir.path(), "r2.ets", "export { HOME } from './r3';\n");
    write(dir.path(), "r1.ets", "export { HOME } from './r2';\n");
    let page = write(
        dir.path(),
        "Deep.ets",
        r#"
import { HOME } from './r1';

@AppRouter({ name: HOME })
export class DeepPage {}
"#,
    );

    assert_eq!(route_name(&scan(&page).unwrap()), Some("deep"));

    let cfg = AnalyzerConfig {
        max_resolve_depth: 2,
        ..AnalyzerConfig::default()
    };
    let limited = RouteScanner::new(cfg).unwrap().scan(&page).unwrap();
    assert!(limited.is_empty());
}

// ============================================================================
// Bare package specifiers
// ============================================================================

#[test]
fn local_dependency_through_manifest() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "entry/oh-package.json5",
        r#"{
  // local module
  name: "entry",
  dependencies: {
    "@app/common": "file:../common",
  },
}"#,
    );
    write(
        dir.path(),
        "common/Index.ets",
        "export { RouteNames } from './src/main/ets/RouteNames';\n",
    );
    write(
        dir.path(),
        "common/src/main/ets/RouteNames.ets",
        ROUTE_NAMES_CLASS,
    );
    let page = write(
        dir.path(),
        "entry/src/main/ets/pages/Login.ets",
        r#"
import { RouteNames } from '@app/common';

@AppRouter({ name: RouteNames.LOGIN_PAGE })
export struct LoginPage {
  build() {}
}
"#,
    );
    let results = scan(&page).unwrap();
    assert_eq!(route_name(&results), Some("login/Page"));
    assert_eq!(results[0].component_name, "LoginPage");
}

#[test]
fn dev_dependency_with_declared_main() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "app/oh-package.json5",
        r#"{ devDependencies: { "shared": "file:./libs/shared" } }"#,
    );
    write(
        dir.path(),
        "app/libs/shared/oh-package.json5",
        r#"{ name: "shared", main: "lib/entry.ets" }"#,
    );
    write(
        dir.path(),
        "app/libs/shared/lib/entry.ets",
        "export const SHARED_ROUTE = 'shared/Page';\n",
    );
    let page = write(
        dir.path(),
        "app/Shared.ets",
        r#"
import { SHARED_ROUTE } from 'shared';

@AppRouter({ name: SHARED_ROUTE })
export class SharedPage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("shared/Page"));
}

#[test]
fn manifest_less_bare_import_uses_module_store() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "node_modules/route-consts/index.ts",
        "export const ABOUT = 'about';\n",
    );
    let page = write(
        dir.path(),
        "src/About.ets",
        r#"
import { ABOUT } from 'route-consts';

@AppRouter({ name: ABOUT })
export class AboutPage {}
"#,
    );
    assert_eq!(route_name(&scan(&page).unwrap()), Some("about"));
}

#[test]
fn unlisted_package_is_unresolved() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "oh-package.json5", "{ dependencies: {} }");
    let page = write(
        dir.path(),
        "Ghost.ets",
        r#"
import { GHOST } from '@app/ghost';

@AppRouter({ name: GHOST })
export class GhostPage {}
"#,
    );
    assert!(scan(&page).unwrap().is_empty());
}
