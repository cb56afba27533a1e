//! Global constants used throughout the compiler.
//!
//! Markers, file names, and limits that more than one module needs live here
//! so the literal values are defined exactly once.

/// Name of the module that carries the framework version.
pub const CORE_MODULE: &str = "Core";

/// Marker replaced by the formatted framework version after placeholder resolution.
pub const VERSION_MARKER: &str = "_V_";

/// Prefix of the formatted version tag (`CL` + `MM` + `mm`).
pub const VERSION_TAG_PREFIX: &str = "CL";

/// Maximum number of full substitution passes before unresolved markers are an error.
///
/// Each pass applies the whole placeholder table to every line, so this bounds
/// the nesting depth of placeholders whose expressions reference other markers.
pub const MAX_PLACEHOLDER_PASSES: usize = 10;

/// Comment separator line used by module banners.
pub const BANNER_RULE: &str = "#------------------------------------------------------------";

/// File extensions picked up by the loader when no configuration overrides them.
pub const DEFAULT_MODULE_EXTENSIONS: &[&str] = &["yaml"];

/// Output directory, relative to the search path.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// File name of the install script.
pub const DEFAULT_INSTALL_FILE: &str = "install.conf";

/// File name of the uninstall script.
pub const DEFAULT_UNINSTALL_FILE: &str = "uninstall.conf";

/// Optional per-project configuration file looked up in the search path.
pub const CONFIG_FILE_NAME: &str = "corelayer.toml";

/// Fallback parallelism when `std::thread::available_parallelism()` fails.
pub const FALLBACK_PARALLELISM: usize = 4;

/// Default number of concurrent element-ordering tasks.
pub fn default_max_parallel() -> usize {
    std::thread::available_parallelism().map(std::num::NonZero::get).unwrap_or(FALLBACK_PARALLELISM)
}
