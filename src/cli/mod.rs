//! Command-line interface for corelayer.
//!
//! ```bash
//! corelayer [OPTIONS] <SEARCH_PATH>
//! ```
//!
//! Loads every module file below `SEARCH_PATH`, compiles the install and
//! uninstall scripts and writes them to `<SEARCH_PATH>/output/install.conf`
//! and `<SEARCH_PATH>/output/uninstall.conf` unless configured otherwise.
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--config <FILE>` - Use a specific configuration file
//! - `--output <DIR>` - Write scripts into another directory
//! - `--max-parallel <N>` - Limit concurrent element ordering
//! - `--dry-run` - Compile and report, write nothing
//! - `--print` - Print both scripts to stdout instead of writing them
//!
//! # Examples
//!
//! ```bash
//! corelayer ./modules
//! corelayer -v --max-parallel 2 ./modules
//! corelayer --print ./modules > review.txt
//! corelayer -o /srv/appliance ./modules
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::CompilerConfig;
use crate::core::CompilerError;
use crate::emitter::CompiledScripts;
use crate::loader::load_modules;
use crate::output::{ScriptWriter, render};
use crate::pipeline::Compiler;
use crate::utils::init_logging;

/// Runtime settings derived from the global flags.
///
/// Separated from [`Cli`] so tests can run commands with an injected
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for this crate, `None` disables logging unless `RUST_LOG` is set.
    pub log_level: Option<String>,

    /// Suppress the run summary.
    pub quiet: bool,
}

/// Compile declarative appliance modules into install and uninstall scripts.
#[derive(Parser, Debug)]
#[command(
    name = "corelayer",
    about = "CoreLayer configuration compiler - build install/uninstall scripts from modules",
    version,
    author
)]
pub struct Cli {
    /// Directory searched recursively for module files.
    search_path: PathBuf,

    /// Enable verbose output (debug logging).
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,

    /// Path to a configuration file.
    ///
    /// Defaults to `corelayer.toml` in the search path when present.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving the scripts, relative to the current directory.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Number of modules whose elements are ordered concurrently.
    #[arg(long, value_name = "N")]
    max_parallel: Option<usize>,

    /// Compile and report without writing any file.
    #[arg(long)]
    dry_run: bool,

    /// Print both scripts to stdout instead of writing them.
    #[arg(long, conflicts_with = "dry_run")]
    print: bool,
}

impl Cli {
    /// Set up logging from the flags and run.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed flags.
    ///
    /// `--verbose` maps to `debug`, `--quiet` disables logging and the summary,
    /// and the default is `warn`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            quiet: self.quiet || self.print,
        }
    }

    /// Run the compiler with an explicit configuration.
    ///
    /// Nothing is written unless both scripts compiled successfully.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        if !self.search_path.is_dir() {
            return Err(CompilerError::SearchPathNotFound {
                path: self.search_path.display().to_string(),
            }
            .into());
        }

        let output_dir = match &self.output {
            Some(dir) if dir.is_relative() => Some(
                std::env::current_dir()
                    .context("Failed to determine the current directory")?
                    .join(dir),
            ),
            other => other.clone(),
        };

        let settings = CompilerConfig::load(&self.search_path, self.config.as_deref())
            .await?
            .with_overrides(output_dir, self.max_parallel)?;

        if !config.quiet {
            println!("{}", "CoreLayer configuration compiler".cyan().bold());
            println!("  Search path: {}", self.search_path.display());
        }

        let modules = {
            let search_path = self.search_path.clone();
            let extensions = settings.module_extensions.clone();
            tokio::task::spawn_blocking(move || load_modules(&search_path, &extensions))
                .await
                .context("Module loading task failed")??
        };

        let compiler = Compiler::new(modules).with_max_parallel(settings.max_parallel);
        let scripts = compiler.compile().await?;
        let plan = compiler.plan().await?;

        if self.print {
            print!("{}", printed_scripts(&settings, &scripts));
            return Ok(());
        }

        if !config.quiet {
            println!("  Modules: {}", plan.install_modules().len());
            println!("  Install order: {}", plan.install_modules().join(" → "));
            println!(
                "  Lines: {} install, {} uninstall",
                scripts.install.len(),
                scripts.uninstall.len()
            );
        }

        let writer = ScriptWriter::from_config(&settings, &self.search_path);

        if self.dry_run {
            if !config.quiet {
                let paths = writer.paths();
                println!("\n{}", "Dry run, nothing written".yellow());
                println!("  Would write {}", paths.install.display());
                println!("  Would write {}", paths.uninstall.display());
            }
            return Ok(());
        }

        let paths = writer.write(&scripts)?;

        if !config.quiet {
            println!("\n{}", "Compilation complete!".green().bold());
            println!("  {} {}", "✓".green(), paths.install.display());
            println!("  {} {}", "✓".green(), paths.uninstall.display());
        }

        Ok(())
    }
}

/// Both scripts for `--print`, each preceded by a `# <file name>` header.
fn printed_scripts(settings: &CompilerConfig, scripts: &CompiledScripts) -> String {
    format!(
        "# {}\n{}# {}\n{}",
        settings.install_file,
        render(&scripts.install),
        settings.uninstall_file,
        render(&scripts.uninstall)
    )
}
