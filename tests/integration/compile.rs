//! Successful compilation runs through the binary.

use predicates::prelude::*;
use tokio::fs;

use crate::common::{appliance_tree, command_lines, corelayer_cmd};

#[tokio::test]
async fn test_compile_writes_both_scripts() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd()
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Compilation complete!"))
        .stdout(predicate::str::contains("Core → Network → Firewall"))
        .stdout(predicate::str::contains("Modules: 3"));

    let install = fs::read_to_string(tree.path().join("output/install.conf")).await.unwrap();
    let uninstall = fs::read_to_string(tree.path().join("output/uninstall.conf")).await.unwrap();

    assert_eq!(
        command_lines(&install),
        vec![
            "enable ns feature LB CS",
            "enable ns mode FR L3",
            "add vlan 20 -aliasName mgmt_CL0201",
            "bind vlan 20 -IPAddress 10.0.0.1 255.255.255.0",
            "add ns acl mgmt_CL0201 ALLOW -srcIP = 10.20.0.0/24",
            "apply ns acls",
        ]
    );
    assert_eq!(
        command_lines(&uninstall),
        vec![
            "clear ns acls",
            "rm ns acl mgmt_CL0201",
            "unbind vlan 20 -IPAddress 10.0.0.1 255.255.255.0",
            "rm vlan 20",
            "disable ns feature LB CS",
        ]
    );
}

#[tokio::test]
async fn test_scripts_are_framed_per_module() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd().arg(tree.path()).assert().success();

    let install = fs::read_to_string(tree.path().join("output/install.conf")).await.unwrap();
    let uninstall = fs::read_to_string(tree.path().join("output/uninstall.conf")).await.unwrap();

    let begins = |content: &str| -> Vec<String> {
        content
            .lines()
            .filter_map(|line| line.strip_prefix("# BEGIN MODULE: "))
            .map(str::to_string)
            .collect()
    };

    assert_eq!(begins(&install), vec!["Core", "Network", "Firewall"]);
    assert_eq!(begins(&uninstall), vec!["Firewall", "Network", "Core"]);
    assert!(install.ends_with('\n'));
    assert!(install.lines().all(|line| !line.trim().is_empty()));
    assert!(!install.contains("_V_"));
}

#[tokio::test]
async fn test_output_is_deterministic() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd().arg(tree.path()).arg("--max-parallel").arg("1").assert().success();
    let first = fs::read_to_string(tree.path().join("output/install.conf")).await.unwrap();

    corelayer_cmd().arg(tree.path()).arg("--max-parallel").arg("8").assert().success();
    let second = fs::read_to_string(tree.path().join("output/install.conf")).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_print_writes_nothing() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd()
        .arg("--print")
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# install.conf\n"))
        .stdout(predicate::str::contains("\n# uninstall.conf\n"))
        .stdout(predicate::str::contains("# BEGIN MODULE: Core"))
        .stdout(predicate::str::contains("apply ns acls"))
        .stdout(predicate::str::contains("clear ns acls"))
        .stdout(predicate::str::contains("Compilation complete!").not());

    assert!(!tree.path().join("output").exists());
}

#[tokio::test]
async fn test_dry_run_reports_paths_only() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd()
        .arg("--dry-run")
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run, nothing written"))
        .stdout(predicate::str::contains("install.conf"));

    assert!(!tree.path().join("output").exists());
}

#[tokio::test]
async fn test_quiet_prints_nothing_on_success() {
    let tree = appliance_tree().unwrap();

    corelayer_cmd().arg("-q").arg(tree.path()).assert().success().stdout(predicate::str::is_empty());

    assert!(tree.path().join("output/install.conf").exists());
}
