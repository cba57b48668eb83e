//! End-to-end tests: load a project tree from disk, resolve it, and run the
//! registered clean task against the redirected build root.

use std::fs;
use std::path::{Path, PathBuf};

use modcfg::prelude::*;
use modcfg_resolver::{TaskOutcome, TaskRegistry};

const MANIFEST: &str = r#"
name = "example"

[[subproject]]
name = "app"
kind = "application"

[[subproject]]
name = "blue_thermal_printer"
plugins = ["com.android.library"]
"#;

/// Lay out `<tmp>/example/android/{project.toml,app,blue_thermal_printer}`
/// so the default `../../build` base lands at `<tmp>/example/build`
fn write_project(tmp: &Path) -> PathBuf {
    let android = tmp.join("example").join("android");
    fs::create_dir_all(android.join("app")).unwrap();
    fs::create_dir_all(android.join("blue_thermal_printer")).unwrap();
    fs::write(android.join("project.toml"), MANIFEST).unwrap();
    android
}

#[tokio::test]
async fn resolve_with_default_settings() {
    let tmp = tempfile::tempdir().unwrap();
    let android = write_project(tmp.path());

    let tree = ProjectTree::load(&android).await.unwrap();
    let settings = ResolverSettings::load(&android).await.unwrap();
    let resolved = Resolver::new(tree, settings).resolve().unwrap();

    assert_eq!(resolved.build_root, tmp.path().join("example").join("build"));
    assert_eq!(resolved.order, vec!["app", "blue_thermal_printer"]);

    let printer = &resolved.configs["blue_thermal_printer"];
    assert_eq!(printer.compile_sdk, Some(34));
    assert_eq!(
        printer.namespace.as_deref(),
        Some("id.kakzaki.blue_thermal_printer")
    );
    assert_eq!(printer.build_dir, resolved.build_root.join("blue_thermal_printer"));
}

#[tokio::test]
async fn resolution_is_idempotent_across_loads() {
    let tmp = tempfile::tempdir().unwrap();
    let android = write_project(tmp.path());

    let mut renderings = Vec::new();
    for _ in 0..2 {
        let tree = ProjectTree::load(&android).await.unwrap();
        let settings = ResolverSettings::load(&android).await.unwrap();
        let resolved = Resolver::new(tree, settings).resolve().unwrap();
        renderings.push(resolved.to_toml_string().unwrap());
    }

    assert_eq!(renderings[0], renderings[1]);
}

#[tokio::test]
async fn clean_removes_redirected_build_root() {
    let tmp = tempfile::tempdir().unwrap();
    let android = write_project(tmp.path());

    let tree = ProjectTree::load(&android).await.unwrap();
    let settings = ResolverSettings::load(&android).await.unwrap();
    let resolved = Resolver::new(tree, settings).resolve().unwrap();

    let app_out = resolved.build_root.join("app");
    fs::create_dir_all(&app_out).unwrap();
    fs::write(app_out.join("output.apk"), b"apk").unwrap();

    let mut registry = TaskRegistry::new();
    registry.register_clean("clean", &resolved.build_root).unwrap();

    let TaskOutcome::Clean(outcome) = registry.run("clean").await.unwrap();
    assert!(outcome.existed);
    assert!(!resolved.build_root.exists());

    // Running again against the now-absent directory still succeeds
    let TaskOutcome::Clean(outcome) = registry.run("clean").await.unwrap();
    assert!(!outcome.existed);
}

#[tokio::test]
async fn settings_file_overrides_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let android = write_project(tmp.path());
    fs::write(
        android.join("modcfg.toml"),
        r#"
version = 1
evaluation_root = "app"

[output]
base = "../artifacts"

[[rule]]
subproject = "blue_thermal_printer"
min_compile_sdk = 36
"#,
    )
    .unwrap();

    let tree = ProjectTree::load(&android).await.unwrap();
    let settings = ResolverSettings::load(&android).await.unwrap();
    let resolved = Resolver::new(tree, settings).resolve().unwrap();

    assert_eq!(
        resolved.build_root,
        tmp.path().join("example").join("android").join("artifacts")
    );
    let printer = &resolved.configs["blue_thermal_printer"];
    assert_eq!(printer.compile_sdk, Some(36));
    // No default_namespace in the override rule, so it stays unset
    assert_eq!(printer.namespace, None);
}
