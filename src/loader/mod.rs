//! Module discovery and parsing.
//!
//! Module files are found by walking the search path recursively. Directory
//! entries are visited sorted by file name, so the resulting [`ModuleSet`] has
//! the same enumeration order on every machine. That order is the tie-breaker
//! for module ordering, which makes it part of the output.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::CompilerError;
use crate::models::{Module, ModuleSet};

/// Load every module file below `search_path`.
///
/// A file is a module file if its extension matches one of `extensions`,
/// ignoring ASCII case.
///
/// # Errors
///
/// - [`CompilerError::SearchPathNotFound`] if `search_path` is not a directory
/// - [`CompilerError::ModuleParseError`] if a module file is not a valid module
/// - [`CompilerError::DuplicateModule`] if two files define the same module name
pub fn load_modules(search_path: &Path, extensions: &[String]) -> Result<ModuleSet> {
    if !search_path.is_dir() {
        return Err(CompilerError::SearchPathNotFound {
            path: search_path.display().to_string(),
        }
        .into());
    }

    let mut modules = ModuleSet::new();
    let mut sources: HashMap<String, PathBuf> = HashMap::new();

    for entry in WalkDir::new(search_path).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to walk search path: {}", search_path.display()))?;

        if !entry.file_type().is_file() || !has_module_extension(entry.path(), extensions) {
            continue;
        }

        let path = entry.into_path();
        let module = read_module(&path)?;
        tracing::debug!("Loaded module '{}' from {}", module.name, path.display());

        let name = module.name.clone();
        if let Err(rejected) = modules.insert(module) {
            let first =
                sources.get(&rejected.name).map_or_else(String::new, |p| p.display().to_string());
            return Err(CompilerError::DuplicateModule {
                name: rejected.name,
                first,
                second: path.display().to_string(),
            }
            .into());
        }
        sources.insert(name, path);
    }

    tracing::info!("Loaded {} module(s) from {}", modules.len(), search_path.display());
    Ok(modules)
}

/// Parse a single module file.
///
/// # Errors
///
/// Fails if the file cannot be read, or with [`CompilerError::ModuleParseError`]
/// if its content is not a module.
pub fn read_module(path: &Path) -> Result<Module> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read module file: {}", path.display()))?;

    let module: Module = serde_yaml::from_str(&content).map_err(|e| CompilerError::ModuleParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if module.name.trim().is_empty() {
        return Err(CompilerError::ModuleParseError {
            file: path.display().to_string(),
            reason: "module name is empty".to_string(),
        }
        .into());
    }

    Ok(module)
}

fn has_module_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}
