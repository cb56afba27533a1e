//! Configuration file and command line flags.

use predicates::prelude::*;
use tempfile::TempDir;
use tokio::fs;

use crate::common::{appliance_tree, corelayer_cmd};

#[tokio::test]
async fn test_config_file_in_search_path() {
    let tree = appliance_tree().unwrap();
    tree.add_file(
        "corelayer.toml",
        "output_dir = \"build\"\ninstall_file = \"setup.conf\"\nuninstall_file = \"teardown.conf\"\n",
    )
    .unwrap();

    corelayer_cmd().arg(tree.path()).assert().success();

    assert!(tree.path().join("build/setup.conf").exists());
    assert!(tree.path().join("build/teardown.conf").exists());
    assert!(!tree.path().join("output").exists());
}

#[tokio::test]
async fn test_output_flag_overrides_config() {
    let tree = appliance_tree().unwrap();
    tree.add_file("corelayer.toml", "output_dir = \"build\"\n").unwrap();
    let target = TempDir::new().unwrap();

    corelayer_cmd().arg("-o").arg(target.path()).arg(tree.path()).assert().success();

    let install = fs::read_to_string(target.path().join("install.conf")).await.unwrap();
    assert!(install.contains("# BEGIN MODULE: Core"));
    assert!(!tree.path().join("build").exists());
}

#[tokio::test]
async fn test_explicit_config_file() {
    let tree = appliance_tree().unwrap();
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("custom.toml");
    fs::write(&config, "install_file = \"custom-install.conf\"\n").await.unwrap();

    corelayer_cmd().arg("--config").arg(&config).arg(tree.path()).assert().success();

    assert!(tree.path().join("output/custom-install.conf").exists());
    assert!(tree.path().join("output/uninstall.conf").exists());
}

#[tokio::test]
async fn test_module_extensions_from_config() {
    let tree = appliance_tree().unwrap();
    tree.add_file("corelayer.toml", "module_extensions = [\"yml\"]\n").unwrap();

    // No .yml files, so Core is missing.
    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Core"));
}

#[test]
fn test_zero_max_parallel_is_rejected() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd()
        .arg("--max-parallel")
        .arg("0")
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("max_parallel"));
}

#[test]
fn test_invalid_config_file() {
    let tree = appliance_tree().unwrap();
    tree.add_file("corelayer.toml", "max_parallel = \"many\"\n").unwrap();

    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("corelayer.toml"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd()
        .arg("--verbose")
        .arg(tree.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded module"));
}
