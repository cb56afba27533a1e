//! The immutable result of ordering a module set.

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::CompilerError;
use crate::models::{ModuleSet, Version};
use crate::resolver::{ElementOrder, KnownElements, order_elements, order_modules};
use crate::templating::PlaceholderTable;

/// Everything the emitter needs, computed once per run.
///
/// A plan is only ever observed fully built: [`CompilationPlan::build`] either
/// returns a complete plan or an error, and nothing in it changes afterwards.
/// Share it behind an [`Arc`] with any number of readers.
#[derive(Debug)]
pub struct CompilationPlan {
    modules: Arc<ModuleSet>,
    install_order: Vec<String>,
    element_orders: HashMap<String, ElementOrder>,
    placeholders: PlaceholderTable,
    version: Version,
}

impl CompilationPlan {
    /// Build the plan for `modules`.
    ///
    /// Steps, in order:
    /// 1. Read the `Core` version
    /// 2. Merge placeholders (collisions are fatal)
    /// 3. Order modules
    /// 4. Compute the known-element table from the module order
    /// 5. Order every module's elements, at most `max_parallel` at a time
    ///
    /// # Errors
    ///
    /// Any [`CompilerError`] raised by the steps above. When several modules
    /// fail in step 5, the error of the module earliest in install order wins.
    pub async fn build(
        modules: Arc<ModuleSet>,
        max_parallel: usize,
    ) -> Result<Self, CompilerError> {
        let version = modules.core_version()?;
        let placeholders = PlaceholderTable::merge(&modules)?;

        let install_order = order_modules(&modules)?;
        tracing::debug!("Module install order: {}", install_order.join(", "));

        let known = Arc::new(KnownElements::from_install_order(&modules, &install_order)?);
        let element_orders =
            order_all_elements(&modules, &install_order, &known, max_parallel).await?;

        tracing::info!(
            "Ordered {} module(s) and {} element(s)",
            install_order.len(),
            element_orders.values().map(ElementOrder::len).sum::<usize>()
        );

        Ok(Self {
            modules,
            install_order,
            element_orders,
            placeholders,
            version,
        })
    }

    /// The module set the plan was built from.
    #[must_use]
    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    /// Module names in install order.
    #[must_use]
    pub fn install_modules(&self) -> &[String] {
        &self.install_order
    }

    /// Module names in uninstall order, the exact reverse of [`Self::install_modules`].
    pub fn uninstall_modules(&self) -> impl Iterator<Item = &str> {
        self.install_order.iter().rev().map(String::as_str)
    }

    /// Element order of one module.
    #[must_use]
    pub fn element_order(&self, module: &str) -> Option<&ElementOrder> {
        self.element_orders.get(module)
    }

    /// Merged placeholders of all modules.
    #[must_use]
    pub const fn placeholders(&self) -> &PlaceholderTable {
        &self.placeholders
    }

    /// Version of the `Core` module.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }
}

/// Fan out element ordering over blocking tasks.
///
/// Every task reads the shared module set and known-element table and returns
/// its own result; the map is assembled here after all tasks finished.
async fn order_all_elements(
    modules: &Arc<ModuleSet>,
    install_order: &[String],
    known: &Arc<KnownElements>,
    max_parallel: usize,
) -> Result<HashMap<String, ElementOrder>, CompilerError> {
    let concurrency = max_parallel.max(1);

    let mut results: Vec<(usize, Result<(String, ElementOrder), CompilerError>)> =
        stream::iter(install_order.iter().cloned().enumerate())
            .map(|(position, name)| {
                let modules = Arc::clone(modules);
                let known = Arc::clone(known);
                async move {
                    let task = tokio::task::spawn_blocking(move || {
                        let module = modules.require(&name)?;
                        let order = order_elements(module, position, &known)?;
                        tracing::debug!("Module '{}' element order: {:?}", name, order.install());
                        Ok::<_, CompilerError>((name, order))
                    });
                    let result = match task.await {
                        Ok(result) => result,
                        Err(e) => Err(CompilerError::Other {
                            message: format!("Element ordering task failed: {e}"),
                        }),
                    };
                    (position, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

    results.sort_by_key(|(position, _)| *position);

    let mut orders = HashMap::with_capacity(results.len());
    for (_, result) in results {
        let (name, order) = result?;
        orders.insert(name, order);
    }

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ElementBuilder, ModuleBuilder};

    fn sample_modules() -> Arc<ModuleSet> {
        let modules = ModuleSet::from_modules([
            ModuleBuilder::new("Firewall")
                .depends_on(["Network"])
                .section(
                    "acl",
                    vec![
                        ElementBuilder::new("acl_apply").depends_on(["acl_rule"]).build(),
                        ElementBuilder::new("acl_rule").build(),
                    ],
                )
                .build(),
            ModuleBuilder::new("Network")
                .depends_on(["Core"])
                .placeholder("VLAN", "20")
                .section("vlan", vec![ElementBuilder::new("vlan").build()])
                .build(),
            ModuleBuilder::core(2, 1)
                .placeholder("NSIP", "10.0.0.1")
                .section("base", vec![ElementBuilder::new("features").build()])
                .build(),
        ])
        .unwrap();
        Arc::new(modules)
    }

    #[tokio::test]
    async fn test_build_exposes_orders_and_tables() {
        let plan = CompilationPlan::build(sample_modules(), 2).await.unwrap();

        assert_eq!(plan.install_modules(), ["Core", "Network", "Firewall"]);
        assert_eq!(plan.uninstall_modules().collect::<Vec<_>>(), vec!["Firewall", "Network", "Core"]);
        assert_eq!(plan.version(), Version::new(2, 1));
        assert_eq!(plan.placeholders().len(), 2);
        assert_eq!(plan.modules().len(), 3);

        let firewall = plan.element_order("Firewall").unwrap();
        assert_eq!(firewall.install(), ["acl_rule", "acl_apply"]);
        assert_eq!(firewall.uninstall().collect::<Vec<_>>(), vec!["acl_apply", "acl_rule"]);
        assert!(plan.element_order("Missing").is_none());
    }

    #[tokio::test]
    async fn test_build_is_independent_of_parallelism() {
        let sequential = CompilationPlan::build(sample_modules(), 1).await.unwrap();
        let parallel = CompilationPlan::build(sample_modules(), 8).await.unwrap();

        assert_eq!(sequential.install_modules(), parallel.install_modules());
        for name in sequential.install_modules() {
            assert_eq!(sequential.element_order(name), parallel.element_order(name));
        }
    }

    #[tokio::test]
    async fn test_zero_parallelism_is_clamped() {
        let plan = CompilationPlan::build(sample_modules(), 0).await.unwrap();
        assert_eq!(plan.install_modules().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_core_fails_before_ordering() {
        let modules = ModuleSet::from_modules([ModuleBuilder::new("Network").build()]).unwrap();

        let err = CompilationPlan::build(Arc::new(modules), 4).await.unwrap_err();

        assert!(matches!(err, CompilerError::MissingCoreModule));
    }

    #[tokio::test]
    async fn test_first_failing_module_in_install_order_is_reported() {
        let modules = ModuleSet::from_modules([
            ModuleBuilder::new("Late")
                .section("s", vec![ElementBuilder::new("x").depends_on(["late_ghost"]).build()])
                .build(),
            ModuleBuilder::core(1, 0)
                .section("s", vec![ElementBuilder::new("y").depends_on(["core_ghost"]).build()])
                .build(),
        ])
        .unwrap();

        // Core is depended on by nobody here, so load order decides: Late first.
        let err = CompilationPlan::build(Arc::new(modules), 4).await.unwrap_err();

        assert!(matches!(
            err,
            CompilerError::UnresolvedDependency { ref dependency, .. } if dependency == "late_ghost"
        ));
    }
}
