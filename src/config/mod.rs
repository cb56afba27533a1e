//! Compiler configuration
//!
//! Settings are read from an optional `corelayer.toml` placed in the search
//! path, or from a file given with `--config`. Every field has a default, so an
//! empty or missing file is valid. Command line flags are applied on top.
//!
//! ```toml
//! # Relative paths resolve against the search path
//! output_dir = "output"
//! install_file = "install.conf"
//! uninstall_file = "uninstall.conf"
//! module_extensions = ["yaml", "yml"]
//! max_parallel = 8
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_INSTALL_FILE, DEFAULT_MODULE_EXTENSIONS, DEFAULT_OUTPUT_DIR,
    DEFAULT_UNINSTALL_FILE, default_max_parallel,
};
use crate::core::CompilerError;

/// Settings for one compiler run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Directory receiving both scripts
    pub output_dir: PathBuf,
    /// File name of the install script
    pub install_file: String,
    /// File name of the uninstall script
    pub uninstall_file: String,
    /// Extensions of module files, without the dot
    pub module_extensions: Vec<String>,
    /// Number of modules whose elements are ordered concurrently
    pub max_parallel: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            install_file: DEFAULT_INSTALL_FILE.to_string(),
            uninstall_file: DEFAULT_UNINSTALL_FILE.to_string(),
            module_extensions: DEFAULT_MODULE_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
            max_parallel: default_max_parallel(),
        }
    }
}

impl CompilerConfig {
    /// Load the configuration for a run over `search_path`.
    ///
    /// An explicit `config_path` must exist. Without one, `corelayer.toml` in
    /// the search path is used when present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the chosen file cannot be read or parsed, or holds invalid values.
    pub async fn load(search_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from(path).await;
        }

        let path = search_path.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, search_path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML for this structure,
    /// or holds invalid values ([`CompilerError::ConfigError`]).
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply command line overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::ConfigError`] if the merged values are invalid.
    pub fn with_overrides(
        mut self,
        output_dir: Option<PathBuf>,
        max_parallel: Option<usize>,
    ) -> Result<Self, CompilerError> {
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        if let Some(max_parallel) = max_parallel {
            self.max_parallel = max_parallel;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::ConfigError`] naming the first invalid key.
    pub fn validate(&self) -> Result<(), CompilerError> {
        if self.max_parallel == 0 {
            return Err(config_error("max_parallel must be at least 1"));
        }
        if self.install_file.trim().is_empty() {
            return Err(config_error("install_file must not be empty"));
        }
        if self.uninstall_file.trim().is_empty() {
            return Err(config_error("uninstall_file must not be empty"));
        }
        if self.install_file == self.uninstall_file {
            return Err(config_error("install_file and uninstall_file must differ"));
        }
        if self.module_extensions.is_empty() {
            return Err(config_error("module_extensions must list at least one extension"));
        }
        if self.module_extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err(config_error("module_extensions must not contain empty entries"));
        }
        Ok(())
    }

    /// Output directory for a run over `search_path`.
    #[must_use]
    pub fn resolve_output_dir(&self, search_path: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            search_path.join(&self.output_dir)
        }
    }
}

fn config_error(message: &str) -> CompilerError {
    CompilerError::ConfigError {
        message: message.to_string(),
    }
}
