//! corelayer - CoreLayer configuration compiler
//!
//! Compiles a directory of declarative configuration modules into two flat
//! command scripts for a CoreLayer ADC appliance: one that installs the
//! configuration and one that removes it again in reverse order.
//!
//! # Architecture Overview
//!
//! A run flows through these stages:
//! - [`loader`] reads every module file below the search path into an
//!   insertion-ordered [`models::ModuleSet`]
//! - [`pipeline`] builds one immutable [`pipeline::CompilationPlan`]: module
//!   order, element order per module, merged placeholders and the `Core` version
//! - [`emitter`] walks the plan in both directions, resolving placeholders,
//!   stamping the version and framing every module with banners
//! - [`output`] writes both scripts atomically
//!
//! ## Key Properties
//!
//! - **Deterministic**: the same module files always produce byte-identical scripts
//! - **Symmetric**: uninstall order is the exact reverse of install order
//! - **All or nothing**: any fatal error means no script is written
//!
//! # Core Modules
//!
//! ## Compilation
//! - [`resolver`] - Occurrence-count ordering for modules and elements
//! - [`templating`] - Placeholder resolution and version stamping
//! - [`pipeline`] - One-time plan construction with bounded parallelism
//! - [`emitter`] - Script emission in install and uninstall direction
//!
//! ## Input and Output
//! - [`models`] - Module, section, element and placeholder definitions
//! - [`loader`] - Recursive module discovery and YAML parsing
//! - [`output`] - Script file writer
//! - [`config`] - `corelayer.toml` settings
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-facing error reporting
//! - [`utils`] - Atomic file writes and logging setup
//! - [`constants`] - Markers, defaults and limits
//!
//! # Module Format
//!
//! ```yaml
//! name: Core
//! version:
//!   major: 2
//!   minor: 1
//! placeholders:
//!   - name: NSIP
//!     expression: 10.0.0.1
//! sections:
//!   - name: base
//!     elements:
//!       - name: ns_ip
//!         expressions:
//!           install: set ns config -IPAddress NSIP
//!           uninstall: clear ns config
//!       - name: patset
//!         dependencies: [ns_ip]
//!         expressions:
//!           install: add policy patset ps__V_
//!           uninstall: rm policy patset ps__V_
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Compile ./modules into ./modules/output/{install,uninstall}.conf
//! corelayer ./modules
//!
//! # Inspect the scripts without writing anything
//! corelayer --print ./modules
//! ```
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use corelayer::loader::load_modules;
//! use corelayer::pipeline::Compiler;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let modules = load_modules(Path::new("modules"), &["yaml".to_string()])?;
//! let scripts = Compiler::new(modules).compile().await?;
//! for line in &scripts.install {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod emitter;
pub mod loader;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
