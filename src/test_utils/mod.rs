//! Test utilities for corelayer
//!
//! Helpers shared by unit tests and, through the `test-utils` feature, by the
//! integration suite:
//! - Builders for modules and elements ([`ModuleBuilder`], [`ElementBuilder`])
//! - Temporary module trees on disk ([`ModuleTree`])
//! - One-time tracing setup ([`init_test_logging`])
//!
//! # Example
//!
//! ```rust,ignore
//! use corelayer::test_utils::{ElementBuilder, ModuleBuilder};
//!
//! let core = ModuleBuilder::core(2, 1)
//!     .placeholder("NSIP", "10.0.0.1")
//!     .section("base", vec![ElementBuilder::new("mode").install("enable ns mode L3").build()])
//!     .build();
//! assert_eq!(core.name, "Core");
//! ```

pub mod builder;
pub mod fixtures;

pub use builder::{ElementBuilder, ModuleBuilder};
pub use fixtures::ModuleTree;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG` if it is set, otherwise leaves logging off.
///
/// ```bash
/// RUST_LOG=corelayer=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
