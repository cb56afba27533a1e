//! On-disk module trees for loader and end-to-end tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::models::Module;

/// A temporary search directory populated with module files.
///
/// The directory is removed when the fixture is dropped.
pub struct ModuleTree {
    temp_dir: TempDir,
}

impl ModuleTree {
    /// Create an empty tree.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temporary module tree")?,
        })
    }

    /// Root of the tree, pass this as the search path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Serialize `module` as YAML to `relative_path`, creating parent directories.
    pub fn add_module(&self, relative_path: &str, module: &Module) -> Result<PathBuf> {
        let yaml = serde_yaml::to_string(module)
            .with_context(|| format!("Failed to serialize module '{}'", module.name))?;
        self.add_file(relative_path, &yaml)
    }

    /// Write raw file content to `relative_path`, creating parent directories.
    pub fn add_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
