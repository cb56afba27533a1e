//! Compilation pipeline.
//!
//! A [`Compiler`] owns the loaded [`ModuleSet`] and builds its
//! [`CompilationPlan`] lazily, exactly once. The first caller of
//! [`Compiler::plan`] drives the build; concurrent callers wait for it and all
//! of them receive the same shared plan. A failed build is not cached, so a
//! later call retries.
//!
//! Emission of both scripts runs concurrently against that one plan.
//!
//! # Example
//!
//! ```rust,no_run
//! use corelayer::models::ModuleSet;
//! use corelayer::pipeline::Compiler;
//!
//! # async fn example(modules: ModuleSet) -> anyhow::Result<()> {
//! let compiler = Compiler::new(modules).with_max_parallel(4);
//! let scripts = compiler.compile().await?;
//! println!("{} install lines", scripts.install.len());
//! # Ok(())
//! # }
//! ```

pub mod plan;

pub use plan::CompilationPlan;

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::constants::default_max_parallel;
use crate::core::CompilerError;
use crate::emitter::{CompiledScripts, Direction, Emitter};
use crate::models::ModuleSet;

/// Builds the plan for a module set once and emits scripts from it.
#[derive(Debug)]
pub struct Compiler {
    modules: Arc<ModuleSet>,
    max_parallel: usize,
    plan: OnceCell<Arc<CompilationPlan>>,
}

impl Compiler {
    /// Create a compiler for `modules` using the default parallelism.
    #[must_use]
    pub fn new(modules: ModuleSet) -> Self {
        Self {
            modules: Arc::new(modules),
            max_parallel: default_max_parallel(),
            plan: OnceCell::new(),
        }
    }

    /// Limit the number of modules whose elements are ordered at the same time.
    #[must_use]
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// The module set being compiled.
    #[must_use]
    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    /// Get the plan, building it on first use.
    pub async fn plan(&self) -> Result<Arc<CompilationPlan>, CompilerError> {
        self.plan
            .get_or_try_init(|| async {
                tracing::debug!(
                    "Building compilation plan for {} module(s), parallelism {}",
                    self.modules.len(),
                    self.max_parallel
                );
                CompilationPlan::build(Arc::clone(&self.modules), self.max_parallel)
                    .await
                    .map(Arc::new)
            })
            .await
            .cloned()
    }

    /// Emit the script for one direction.
    pub async fn emit(&self, direction: Direction) -> Result<Vec<String>, CompilerError> {
        let plan = self.plan().await?;
        Emitter::new(&plan).emit(direction)
    }

    /// Emit both scripts.
    pub async fn compile(&self) -> Result<CompiledScripts, CompilerError> {
        let (install, uninstall) =
            tokio::try_join!(self.emit(Direction::Install), self.emit(Direction::Uninstall))?;

        Ok(CompiledScripts {
            install,
            uninstall,
        })
    }
}
