//! Script emission.
//!
//! Walks a finished [`CompilationPlan`] in one direction and turns it into
//! output lines. For every module, in module order for that direction, the
//! emitter writes a begin banner, the module's element text in element order
//! for that direction, and an end banner.
//!
//! Element text goes through three steps before framing:
//!
//! 1. Placeholder resolution over the whole script
//! 2. Version stamping
//! 3. Splitting into lines, dropping lines that are empty or whitespace only
//!
//! Banners are added after these steps, so they are never substituted.

use std::collections::HashMap;

use crate::constants::BANNER_RULE;
use crate::core::CompilerError;
use crate::models::Element;
use crate::pipeline::CompilationPlan;
use crate::templating::VersionStamper;

/// Which script to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward order, install text
    Install,
    /// Reverse order, uninstall text
    Uninstall,
}

impl Direction {
    /// Lowercase name, used in log messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both finished scripts of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledScripts {
    /// Install script lines
    pub install: Vec<String>,
    /// Uninstall script lines
    pub uninstall: Vec<String>,
}

impl CompiledScripts {
    /// Lines of one direction.
    #[must_use]
    pub fn lines(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Install => &self.install,
            Direction::Uninstall => &self.uninstall,
        }
    }
}

/// Banner lines written before a module's commands.
#[must_use]
pub fn begin_banner(module: &str) -> [String; 3] {
    banner("BEGIN", module)
}

/// Banner lines written after a module's commands.
#[must_use]
pub fn end_banner(module: &str) -> [String; 3] {
    banner("END", module)
}

fn banner(marker: &str, module: &str) -> [String; 3] {
    [BANNER_RULE.to_string(), format!("# {marker} MODULE: {module}"), BANNER_RULE.to_string()]
}

/// Commands of one module before substitution.
struct ModuleBlock<'p> {
    module: &'p str,
    texts: Vec<String>,
}

/// Emits scripts from a finished plan.
pub struct Emitter<'p> {
    plan: &'p CompilationPlan,
    stamper: VersionStamper,
}

impl<'p> Emitter<'p> {
    /// Create an emitter for `plan`.
    #[must_use]
    pub fn new(plan: &'p CompilationPlan) -> Self {
        Self {
            plan,
            stamper: VersionStamper::new(plan.version()),
        }
    }

    /// Emit the script for `direction`.
    ///
    /// # Errors
    ///
    /// - [`CompilerError::ElementNotFound`] if an ordered element name has no
    ///   definition in its module
    /// - [`CompilerError::UnresolvedPlaceholders`] if substitution does not
    ///   reach a fixed point
    pub fn emit(&self, direction: Direction) -> Result<Vec<String>, CompilerError> {
        let blocks = self.collect_blocks(direction)?;

        let sizes: Vec<usize> = blocks.iter().map(|block| block.texts.len()).collect();
        let texts: Vec<String> = blocks.iter().flat_map(|block| block.texts.iter().cloned()).collect();

        let resolved = self.plan.placeholders().resolve(texts)?;
        let stamped = self.stamper.stamp_all(resolved);

        let mut lines = Vec::new();
        let mut stamped = stamped.into_iter();
        for (block, size) in blocks.iter().zip(sizes) {
            lines.extend(begin_banner(block.module));
            for text in stamped.by_ref().take(size) {
                lines.extend(split_lines(&text));
            }
            lines.extend(end_banner(block.module));
        }

        tracing::debug!(
            "Emitted {} {} line(s) for {} module(s)",
            lines.len(),
            direction,
            blocks.len()
        );

        Ok(lines)
    }

    fn collect_blocks(&self, direction: Direction) -> Result<Vec<ModuleBlock<'p>>, CompilerError> {
        let module_names: Vec<&'p str> = match direction {
            Direction::Install => {
                self.plan.install_modules().iter().map(String::as_str).collect()
            }
            Direction::Uninstall => self.plan.uninstall_modules().collect(),
        };

        let mut blocks = Vec::with_capacity(module_names.len());
        for name in module_names {
            let module = self.plan.modules().require(name)?;
            let order = self.plan.element_order(name).ok_or_else(|| {
                CompilerError::ModuleNotFound {
                    name: name.to_string(),
                }
            })?;

            let by_name: HashMap<&str, &Element> =
                module.elements().map(|element| (element.name.as_str(), element)).collect();

            let element_names: Vec<&str> = match direction {
                Direction::Install => order.install().iter().map(String::as_str).collect(),
                Direction::Uninstall => order.uninstall().collect(),
            };

            let mut texts = Vec::with_capacity(element_names.len());
            for element_name in element_names {
                let element = by_name.get(element_name).ok_or_else(|| {
                    CompilerError::ElementNotFound {
                        module: name.to_string(),
                        element: element_name.to_string(),
                    }
                })?;
                let text = match direction {
                    Direction::Install => &element.expressions.install,
                    Direction::Uninstall => &element.expressions.uninstall,
                };
                texts.push(text.clone());
            }

            blocks.push(ModuleBlock {
                module: name,
                texts,
            });
        }

        Ok(blocks)
    }
}

/// Split element text into output lines, dropping blank ones.
fn split_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().filter(|line| !line.trim().is_empty()).map(str::to_string)
}
