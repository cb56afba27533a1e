//! Fatal errors: exit status 1, a readable message, and no scripts on disk.

use corelayer::test_utils::{ElementBuilder, ModuleBuilder, ModuleTree};
use predicates::prelude::*;

use crate::common::{appliance_tree, corelayer_cmd};

fn assert_no_output(tree: &ModuleTree) {
    assert!(!tree.path().join("output/install.conf").exists());
    assert!(!tree.path().join("output/uninstall.conf").exists());
}

#[test]
fn test_placeholder_collision_fails_without_output() {
    let tree = appliance_tree().unwrap();
    tree.add_module(
        "d_extra.yaml",
        &ModuleBuilder::new("Extra").depends_on(["Core"]).placeholder("NSIP", "10.9.9.9").build(),
    )
    .unwrap();

    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate placeholder 'NSIP'"))
        .stderr(predicate::str::contains("Extra"));

    assert_no_output(&tree);
}

#[test]
fn test_missing_core_module() {
    let tree = ModuleTree::new().unwrap();
    tree.add_module("network.yaml", &ModuleBuilder::new("Network").build()).unwrap();

    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Core"));

    assert_no_output(&tree);
}

#[test]
fn test_unresolved_placeholder_cycle() {
    let tree = ModuleTree::new().unwrap();
    tree.add_module(
        "core.yaml",
        &ModuleBuilder::core(1, 0)
            .placeholder("PING", "PONG")
            .placeholder("PONG", "PING")
            .section("s", vec![ElementBuilder::new("e").install("echo PING").build()])
            .build(),
    )
    .unwrap();

    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unresolved placeholders"));

    assert_no_output(&tree);
}

#[test]
fn test_unknown_module_dependency() {
    let tree = ModuleTree::new().unwrap();
    tree.add_module("core.yaml", &ModuleBuilder::core(1, 0).build()).unwrap();
    tree.add_module("lb.yaml", &ModuleBuilder::new("Lb").depends_on(["Ghost"]).build()).unwrap();

    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Ghost"));

    assert_no_output(&tree);
}

#[test]
fn test_malformed_module_file() {
    let tree = ModuleTree::new().unwrap();
    tree.add_file("broken.yaml", "name: [unclosed").unwrap();

    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.yaml"));
}

#[test]
fn test_missing_search_path() {
    let tree = ModuleTree::new().unwrap();

    corelayer_cmd()
        .arg(tree.path().join("does-not-exist"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_failed_run_keeps_previous_scripts() {
    let tree = appliance_tree().unwrap();
    corelayer_cmd().arg(tree.path()).assert().success();
    let before = std::fs::read_to_string(tree.path().join("output/install.conf")).unwrap();

    tree.add_module("z_ghost.yaml", &ModuleBuilder::new("Broken").depends_on(["Ghost"]).build())
        .unwrap();
    corelayer_cmd().arg(tree.path()).assert().code(1);

    let after = std::fs::read_to_string(tree.path().join("output/install.conf")).unwrap();
    assert_eq!(before, after);
}
