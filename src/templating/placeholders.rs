//! Placeholder substitution resolved to a fixed point.
//!
//! Every module may contribute placeholders. They are merged into one
//! [`PlaceholderTable`] per run and applied to the emitted command text as
//! plain, case-sensitive substring replacement. An expression may itself
//! contain other markers, so the whole table is applied repeatedly until no
//! marker is left or the pass budget is spent.
//!
//! Within one pass markers are applied in descending lexicographic order. A
//! marker that extends another one (`NS_IP` and `NS`) sorts after its prefix
//! and is therefore replaced first, so the shorter marker never eats into the
//! longer one.

use std::collections::{BTreeMap, HashMap};

use crate::constants::MAX_PLACEHOLDER_PASSES;
use crate::core::CompilerError;
use crate::models::ModuleSet;

/// Merged placeholder definitions of all modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderTable {
    entries: BTreeMap<String, String>,
}

impl PlaceholderTable {
    /// Merge the placeholders of every module, in module load order.
    ///
    /// # Errors
    ///
    /// - [`CompilerError::DuplicatePlaceholder`] if two definitions share a name,
    ///   within one module or across modules
    /// - [`CompilerError::InvalidPlaceholder`] for an empty marker name
    pub fn merge(modules: &ModuleSet) -> Result<Self, CompilerError> {
        let mut entries = BTreeMap::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for module in modules.iter() {
            for placeholder in &module.placeholders {
                if placeholder.name.is_empty() {
                    return Err(CompilerError::InvalidPlaceholder {
                        module: module.name.clone(),
                        reason: "placeholder name is empty".to_string(),
                    });
                }

                if let Some(first_module) = owners.insert(&placeholder.name, &module.name) {
                    return Err(CompilerError::DuplicatePlaceholder {
                        name: placeholder.name.clone(),
                        first_module: first_module.to_string(),
                        second_module: module.name.clone(),
                    });
                }

                entries.insert(placeholder.name.clone(), placeholder.expression.clone());
            }
        }

        tracing::debug!("Merged {} placeholder(s) from {} module(s)", entries.len(), modules.len());

        Ok(Self {
            entries,
        })
    }

    /// Number of placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no placeholders are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(marker, expression)` pairs in the order they are applied within a pass.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().rev().map(|(name, expression)| (name.as_str(), expression.as_str()))
    }

    /// Resolve all markers in `lines` with the default pass budget.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::UnresolvedPlaceholders`] if markers remain after
    /// [`MAX_PLACEHOLDER_PASSES`] passes.
    pub fn resolve(&self, lines: Vec<String>) -> Result<Vec<String>, CompilerError> {
        self.resolve_with_limit(lines, MAX_PLACEHOLDER_PASSES)
    }

    /// Resolve all markers in `lines`, making at most `max_passes` full passes.
    ///
    /// Lines without markers come back unchanged, and the result of a
    /// successful call contains no marker, so resolving it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::UnresolvedPlaceholders`] listing the markers
    /// still present after the last pass.
    pub fn resolve_with_limit(
        &self,
        mut lines: Vec<String>,
        max_passes: usize,
    ) -> Result<Vec<String>, CompilerError> {
        for pass in 0..max_passes {
            if !lines.iter().any(|line| self.has_marker(line)) {
                tracing::trace!("Placeholders resolved after {} pass(es)", pass);
                return Ok(lines);
            }

            for line in &mut lines {
                if self.has_marker(line) {
                    *line = self.apply(line);
                }
            }
        }

        let markers = self.remaining_markers(&lines);
        if markers.is_empty() {
            return Ok(lines);
        }

        Err(CompilerError::UnresolvedPlaceholders {
            markers,
            passes: max_passes,
        })
    }

    fn has_marker(&self, line: &str) -> bool {
        self.entries.keys().any(|marker| line.contains(marker.as_str()))
    }

    fn apply(&self, line: &str) -> String {
        self.iter().fold(line.to_string(), |text, (marker, expression)| {
            if text.contains(marker) {
                text.replace(marker, expression)
            } else {
                text
            }
        })
    }

    fn remaining_markers(&self, lines: &[String]) -> Vec<String> {
        self.entries
            .keys()
            .filter(|marker| lines.iter().any(|line| line.contains(marker.as_str())))
            .cloned()
            .collect()
    }
}
