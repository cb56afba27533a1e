//! Element emission order within a module.
//!
//! Elements are counted per module with the same weights as modules, with one
//! addition: names already placed by a module earlier in install order are
//! frozen. They are not walked again and are left out of later modules'
//! orders, so a shared element is emitted once, by the first module that owns
//! it, in both directions.
//!
//! The frozen names are computed once, sequentially, from the module install
//! order ([`KnownElements`]). Ordering individual modules afterwards only reads
//! that value, so modules can be ordered in any order or in parallel and still
//! produce the same result.

use std::collections::{HashMap, HashSet};

use crate::core::CompilerError;
use crate::models::{Module, ModuleSet};

use super::weights::count_weights;

/// Element names already ordered by earlier modules.
///
/// Stores, for every element name, the install position of the first module
/// that owns it. A name is known to the module at position `p` iff that first
/// owner sits before `p`.
#[derive(Debug, Clone, Default)]
pub struct KnownElements {
    first_owner: HashMap<String, usize>,
}

impl KnownElements {
    /// Build the table from the module install order.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::ModuleNotFound`] if `install_order` names a
    /// module missing from `modules`.
    pub fn from_install_order(
        modules: &ModuleSet,
        install_order: &[String],
    ) -> Result<Self, CompilerError> {
        let mut first_owner = HashMap::new();

        for (position, name) in install_order.iter().enumerate() {
            let module = modules.require(name)?;
            for element in module.elements() {
                first_owner.entry(element.name.clone()).or_insert(position);
            }
        }

        Ok(Self {
            first_owner,
        })
    }

    /// Whether `name` was already ordered by a module before `position`.
    #[must_use]
    pub fn is_known_before(&self, name: &str, position: usize) -> bool {
        self.first_owner.get(name).is_some_and(|owner| *owner < position)
    }
}

/// Emission order of one module's elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementOrder {
    install: Vec<String>,
}

impl ElementOrder {
    /// Wrap an install order.
    #[must_use]
    pub const fn new(install: Vec<String>) -> Self {
        Self {
            install,
        }
    }

    /// Element names in install order.
    #[must_use]
    pub fn install(&self) -> &[String] {
        &self.install
    }

    /// Element names in uninstall order, the exact reverse of [`Self::install`].
    pub fn uninstall(&self) -> impl Iterator<Item = &str> {
        self.install.iter().rev().map(String::as_str)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.install.len()
    }

    /// Whether the module has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.install.is_empty()
    }
}

/// Order the elements of `module`, which sits at `position` in the module
/// install order.
///
/// # Errors
///
/// - [`CompilerError::DuplicateElement`] if two sections share an element name
/// - [`CompilerError::UnresolvedDependency`] if an element depends on a name
///   that is neither in this module nor known from an earlier one
pub fn order_elements(
    module: &Module,
    position: usize,
    known: &KnownElements,
) -> Result<ElementOrder, CompilerError> {
    let mut seen = HashSet::new();
    for element in module.elements() {
        if !seen.insert(element.name.as_str()) {
            return Err(CompilerError::DuplicateElement {
                module: module.name.clone(),
                element: element.name.clone(),
            });
        }
    }

    let scope = format!("module '{}'", module.name);
    let table = count_weights(
        module.elements(),
        |name| known.is_known_before(name, position),
        &scope,
    )?;

    let (frozen, install): (Vec<String>, Vec<String>) = table
        .descending()
        .into_iter()
        .partition(|name| known.is_known_before(name, position));
    if !frozen.is_empty() {
        tracing::debug!(
            "Skipping {} element(s) of {} already ordered by earlier modules: {}",
            frozen.len(),
            scope,
            frozen.join(", ")
        );
    }

    Ok(ElementOrder::new(install))
}
