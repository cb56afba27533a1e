//! Shared utilities
//!
//! - [`fs`] - Directory creation and atomic file writes
//! - [`logging`] - Tracing subscriber setup for the binary
//!
//! # Example
//!
//! ```rust,no_run
//! use corelayer::utils::{atomic_write_all, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("output"))?;
//! atomic_write_all(&[
//!     (Path::new("output/install.conf").to_path_buf(), b"add vlan 20\n".to_vec()),
//!     (Path::new("output/uninstall.conf").to_path_buf(), b"rm vlan 20\n".to_vec()),
//! ])?;
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod logging;

pub use fs::{atomic_write_all, ensure_dir};
pub use logging::init_logging;
