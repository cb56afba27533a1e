//! Common test utilities and fixtures for corelayer integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use corelayer::test_utils::{ElementBuilder, ModuleBuilder, ModuleTree};

/// Command for the compiled `corelayer` binary with logging disabled.
pub fn corelayer_cmd() -> Command {
    let mut cmd = Command::cargo_bin("corelayer").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Module tree with `Core` (2.1), `Network` depending on `Core`, and
/// `Firewall` depending on `Network`.
///
/// Files are named so load order differs from dependency order.
pub fn appliance_tree() -> Result<ModuleTree> {
    let tree = ModuleTree::new()?;

    tree.add_module(
        "a_firewall.yaml",
        &ModuleBuilder::new("Firewall")
            .depends_on(["Network"])
            .section(
                "acl",
                vec![
                    ElementBuilder::new("acl_apply")
                        .depends_on(["acl_mgmt"])
                        .install("apply ns acls")
                        .uninstall("clear ns acls")
                        .build(),
                    ElementBuilder::new("acl_mgmt")
                        .install("add ns acl mgmt__V_ ALLOW -srcIP = MGMT_NET")
                        .uninstall("rm ns acl mgmt__V_")
                        .build(),
                ],
            )
            .build(),
    )?;

    tree.add_module(
        "b_network.yaml",
        &ModuleBuilder::new("Network")
            .depends_on(["Core"])
            .placeholder("MGMT_NET", "MGMT_VLAN_NET.0/24")
            .placeholder("MGMT_VLAN_NET", "10.20.0")
            .section(
                "vlan",
                vec![
                    ElementBuilder::new("vlan_bind")
                        .depends_on(["vlan"])
                        .install("bind vlan 20 -IPAddress NSIP 255.255.255.0")
                        .uninstall("unbind vlan 20 -IPAddress NSIP 255.255.255.0")
                        .build(),
                    ElementBuilder::new("vlan")
                        .install("add vlan 20 -aliasName mgmt__V_")
                        .uninstall("rm vlan 20")
                        .build(),
                ],
            )
            .build(),
    )?;

    tree.add_module(
        "c_core.yaml",
        &ModuleBuilder::core(2, 1)
            .placeholder("NSIP", "10.0.0.1")
            .section(
                "base",
                vec![
                    ElementBuilder::new("features")
                        .install("enable ns feature LB CS\n\nenable ns mode FR L3")
                        .uninstall("disable ns feature LB CS")
                        .build(),
                ],
            )
            .build(),
    )?;

    Ok(tree)
}

/// Lines of a script file, excluding banner comments.
pub fn command_lines(content: &str) -> Vec<&str> {
    content.lines().filter(|line| !line.starts_with('#')).collect()
}
