//! Occurrence-count weights for dependency ordering.
//!
//! The compiler does not topologically sort modules or elements. Instead every
//! item gets a weight equal to how often it is reached while walking the
//! dependency lists of all items, and items are emitted by descending weight.
//! Anything depended upon (directly or transitively, possibly many times)
//! therefore floats towards the front.
//!
//! # Algorithm
//!
//! 1. Every item starts at weight 0.
//! 2. For each item, in enumeration order, that is not already known from an
//!    earlier pass: add 1 to its own weight, then walk its dependencies.
//! 3. Walking a dependency adds 1 to its weight and continues into that name's
//!    own dependencies.
//!
//! Names already known are skipped entirely, both as walk roots and when
//! reached as dependencies.
//!
//! The walk carries the current path. Reaching a name that is already on the
//! path means the input is cyclic: the weight of that name is still counted
//! once, the branch is not expanded further, and the cycle is logged and
//! recorded in [`WeightTable::cycles`]. Counting then continues normally.
//!
//! This is an approximation of dependency depth, not a rank: unrelated items
//! with equal weight keep their enumeration order, and asymmetric fan-out can
//! produce orders that a topological sort would not.

use indexmap::IndexMap;

use crate::core::CompilerError;
use crate::models::{Element, Module};

/// Something that has a name and names the items it depends on.
pub trait DependencyNode {
    /// Unique name within the counting scope.
    fn name(&self) -> &str;

    /// Names this item depends on.
    fn dependencies(&self) -> &[String];
}

impl DependencyNode for Module {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

impl DependencyNode for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

/// Weights per item name, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightTable {
    weights: IndexMap<String, usize>,
    cycles: Vec<Vec<String>>,
}

impl WeightTable {
    /// Weight of a single item.
    #[must_use]
    pub fn weight(&self, name: &str) -> Option<usize> {
        self.weights.get(name).copied()
    }

    /// `(name, weight)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.weights.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    /// Number of items counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no items were counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Cycles detected while counting; each path starts and ends with the same name.
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// Item names by descending weight. Equal weights keep enumeration order.
    #[must_use]
    pub fn descending(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &usize)> = self.weights.iter().collect();
        // sort_by is stable
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries.into_iter().map(|(name, _)| name.clone()).collect()
    }
}

/// Count weights for `items`.
///
/// `is_known` reports names already ordered by an earlier pass; they are
/// neither counted nor walked. `scope` only labels errors.
///
/// # Errors
///
/// Returns [`CompilerError::UnresolvedDependency`] when a dependency names an
/// item that is neither in `items` nor known.
pub fn count_weights<'a, N, I, K>(
    items: I,
    is_known: K,
    scope: &str,
) -> Result<WeightTable, CompilerError>
where
    N: DependencyNode + 'a,
    I: IntoIterator<Item = &'a N>,
    K: Fn(&str) -> bool,
{
    let nodes: IndexMap<&str, &N> = items.into_iter().map(|node| (node.name(), node)).collect();

    let mut counter = Counter {
        nodes: &nodes,
        is_known: &is_known,
        scope,
        table: WeightTable {
            weights: nodes.keys().map(|name| ((*name).to_string(), 0)).collect(),
            cycles: Vec::new(),
        },
    };

    for (name, node) in &nodes {
        if is_known(*name) {
            continue;
        }
        counter.bump(*name);
        let mut path = vec![*name];
        counter.walk(*node, &mut path)?;
    }

    Ok(counter.table)
}

struct Counter<'n, 'a, N, K> {
    nodes: &'n IndexMap<&'a str, &'a N>,
    is_known: &'n K,
    scope: &'n str,
    table: WeightTable,
}

impl<'a, N, K> Counter<'_, 'a, N, K>
where
    N: DependencyNode,
    K: Fn(&str) -> bool,
{
    fn bump(&mut self, name: &str) {
        if let Some(weight) = self.table.weights.get_mut(name) {
            *weight += 1;
        }
    }

    fn walk(&mut self, node: &'a N, path: &mut Vec<&'a str>) -> Result<(), CompilerError> {
        for dependency in node.dependencies() {
            if (self.is_known)(dependency.as_str()) {
                continue;
            }

            let Some((&dep_name, &dep_node)) = self.nodes.get_key_value(dependency.as_str())
            else {
                return Err(CompilerError::UnresolvedDependency {
                    scope: self.scope.to_string(),
                    item: node.name().to_string(),
                    dependency: dependency.clone(),
                });
            };

            self.bump(dep_name);

            if path.contains(&dep_name) {
                let mut cycle: Vec<String> = path
                    .iter()
                    .skip_while(|name| **name != dep_name)
                    .map(|name| (*name).to_string())
                    .collect();
                cycle.push(dep_name.to_string());
                tracing::warn!(
                    "Dependency cycle in {}: {}; not expanding '{}' further",
                    self.scope,
                    cycle.join(" → "),
                    dep_name
                );
                self.table.cycles.push(cycle);
                continue;
            }

            path.push(dep_name);
            self.walk(dep_node, path)?;
            path.pop();
        }

        Ok(())
    }
}
