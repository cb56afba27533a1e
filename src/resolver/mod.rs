//! Emission ordering for modules and elements.
//!
//! This module turns the dependency name lists of module files into the order
//! in which commands are written to the install script. Uninstall order is
//! always the exact reverse and is never computed on its own.
//!
//! # Architecture Overview
//!
//! Ordering runs in two phases, both driven by the same occurrence-count
//! heuristic in [`weights`]:
//!
//! ## Phase 1: Module order ([`module_order`])
//! - Count weights over all modules.
//! - Sort by descending weight; ties keep load order.
//!
//! ## Phase 2: Element order ([`element_order`])
//! - Build [`KnownElements`] sequentially from the phase 1 order.
//! - Count weights over each module's flattened elements, skipping names an
//!   earlier module already placed.
//!
//! Phase 2 only reads shared data, so the pipeline runs it for all modules
//! concurrently (see [`crate::pipeline`]).
//!
//! # Ordering semantics
//!
//! The order must match scripts generated by earlier releases exactly, so this
//! is not a topological sort. The weights approximate dependency
//! depth; they are not a rank. Cycles are tolerated: the walk stops at a name
//! already on its path and reports it instead of recursing forever.
//!
//! # Example
//!
//! ```rust,no_run
//! use corelayer::models::ModuleSet;
//! use corelayer::resolver::{KnownElements, order_elements, order_modules};
//!
//! fn plan(modules: &ModuleSet) -> Result<(), corelayer::core::CompilerError> {
//!     let install = order_modules(modules)?;
//!     let known = KnownElements::from_install_order(modules, &install)?;
//!     for (position, name) in install.iter().enumerate() {
//!         let module = modules.require(name)?;
//!         let order = order_elements(module, position, &known)?;
//!         println!("{name}: {:?}", order.install());
//!     }
//!     Ok(())
//! }
//! ```

pub mod element_order;
pub mod module_order;
pub mod weights;

pub use element_order::{ElementOrder, KnownElements, order_elements};
pub use module_order::order_modules;
pub use weights::{DependencyNode, WeightTable, count_weights};
