//! Integration test suite for corelayer
//!
//! End-to-end tests that run the `corelayer` binary against module trees in
//! temporary directories, plus library-level runs of the full pipeline.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **compile**: Successful runs and the content of both scripts
//! - **errors**: Fatal configuration errors and their exit status
//! - **options**: Configuration file and command line flags
//! - **library**: Loader, compiler and writer used as a library

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod compile;
mod errors;
mod library;
mod options;
