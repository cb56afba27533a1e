//! Writing compiled scripts to disk.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::CompilerConfig;
use crate::emitter::CompiledScripts;
use crate::utils::fs::atomic_write_all;

/// Where both scripts of a run were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPaths {
    /// Install script path
    pub install: PathBuf,
    /// Uninstall script path
    pub uninstall: PathBuf,
}

/// Writes the install and uninstall scripts into one directory.
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    output_dir: PathBuf,
    install_file: String,
    uninstall_file: String,
}

impl ScriptWriter {
    /// Create a writer for explicit file names.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        install_file: impl Into<String>,
        uninstall_file: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            install_file: install_file.into(),
            uninstall_file: uninstall_file.into(),
        }
    }

    /// Create a writer from configuration for a run over `search_path`.
    #[must_use]
    pub fn from_config(config: &CompilerConfig, search_path: &Path) -> Self {
        Self::new(
            config.resolve_output_dir(search_path),
            config.install_file.clone(),
            config.uninstall_file.clone(),
        )
    }

    /// Target paths, whether or not they exist yet.
    #[must_use]
    pub fn paths(&self) -> ScriptPaths {
        ScriptPaths {
            install: self.output_dir.join(&self.install_file),
            uninstall: self.output_dir.join(&self.uninstall_file),
        }
    }

    /// Write both scripts.
    ///
    /// Lines are joined with `\n` and the file ends with a newline. Both files
    /// are staged before either target is replaced.
    ///
    /// # Errors
    ///
    /// Fails if the output directory cannot be created or a file cannot be
    /// written.
    pub fn write(&self, scripts: &CompiledScripts) -> Result<ScriptPaths> {
        let paths = self.paths();

        atomic_write_all(&[
            (paths.install.clone(), render(&scripts.install).into_bytes()),
            (paths.uninstall.clone(), render(&scripts.uninstall).into_bytes()),
        ])?;

        tracing::info!(
            "Wrote {} and {}",
            paths.install.display(),
            paths.uninstall.display()
        );

        Ok(paths)
    }
}

/// Join script lines into file content.
#[must_use]
pub fn render(lines: &[String]) -> String {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    content
}
