//! The full pipeline used as a library.

use corelayer::config::CompilerConfig;
use corelayer::core::CompilerError;
use corelayer::loader::load_modules;
use corelayer::output::ScriptWriter;
use corelayer::pipeline::Compiler;
use corelayer::test_utils::{ElementBuilder, ModuleBuilder, ModuleTree, init_test_logging};
use std::sync::Arc;

use crate::common::{appliance_tree, command_lines};

#[tokio::test]
async fn test_load_compile_write() {
    init_test_logging(None);
    let tree = appliance_tree().unwrap();
    let config = CompilerConfig::load(tree.path(), None).await.unwrap();

    let modules = load_modules(tree.path(), &config.module_extensions).unwrap();
    assert_eq!(modules.names().collect::<Vec<_>>(), vec!["Firewall", "Network", "Core"]);

    let compiler = Compiler::new(modules).with_max_parallel(config.max_parallel);
    let scripts = compiler.compile().await.unwrap();

    let plan = compiler.plan().await.unwrap();
    assert_eq!(plan.install_modules(), ["Core", "Network", "Firewall"]);
    assert_eq!(plan.uninstall_modules().collect::<Vec<_>>(), vec!["Firewall", "Network", "Core"]);
    assert_eq!(plan.version().to_string(), "2.1");

    let paths = ScriptWriter::from_config(&config, tree.path()).write(&scripts).unwrap();
    let install = std::fs::read_to_string(paths.install).unwrap();
    assert_eq!(command_lines(&install).len(), 6);
}

#[tokio::test]
async fn test_plan_is_built_once_for_concurrent_callers() {
    let tree = appliance_tree().unwrap();
    let modules = load_modules(tree.path(), &["yaml".to_string()]).unwrap();
    let compiler = Arc::new(Compiler::new(modules).with_max_parallel(2));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let compiler = Arc::clone(&compiler);
            tokio::spawn(async move { compiler.plan().await.unwrap() })
        })
        .collect();

    let mut plans = Vec::new();
    for handle in handles {
        plans.push(handle.await.unwrap());
    }

    assert!(plans.iter().all(|plan| Arc::ptr_eq(plan, &plans[0])));
}

#[tokio::test]
async fn test_cyclic_elements_still_compile() {
    let tree = ModuleTree::new().unwrap();
    tree.add_module(
        "core.yaml",
        &ModuleBuilder::core(3, 7)
            .section(
                "lb",
                vec![
                    ElementBuilder::new("server").depends_on(["service"]).install("add server s1 _V_").build(),
                    ElementBuilder::new("service").depends_on(["server"]).install("add service svc1").build(),
                ],
            )
            .build(),
    )
    .unwrap();

    let modules = load_modules(tree.path(), &["yaml".to_string()]).unwrap();
    let scripts = Compiler::new(modules).compile().await.unwrap();

    let commands = command_lines_of(&scripts.install);
    assert_eq!(commands.len(), 2);
    assert!(commands.contains(&"add server s1 CL0307"));
    assert!(commands.contains(&"add service svc1"));
}

#[tokio::test]
async fn test_duplicate_module_names_across_files() {
    let tree = appliance_tree().unwrap();
    tree.add_module("nested/again.yaml", &ModuleBuilder::new("Network").build()).unwrap();

    let err = load_modules(tree.path(), &["yaml".to_string()]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CompilerError>(),
        Some(CompilerError::DuplicateModule { name, .. }) if name == "Network"
    ));
}

fn command_lines_of(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).filter(|line| !line.starts_with('#')).collect()
}
