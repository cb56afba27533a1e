//! Data model for module definitions
//!
//! Module files are deserialized straight into these types (camelCase field
//! names, YAML on disk). After loading they are never mutated: the whole
//! compilation run borrows them through a shared [`ModuleSet`].
//!
//! ```yaml
//! name: Network
//! dependencies: [Core]
//! placeholders:
//!   - name: MGMT_VLAN
//!     expression: "10"
//! sections:
//!   - name: vlans
//!     elements:
//!       - name: vlan_mgmt
//!         dependencies: []
//!         expressions:
//!           install: add vlan MGMT_VLAN -aliasName mgmt__V_
//!           uninstall: rm vlan MGMT_VLAN
//! ```
//!
//! Absent lists deserialize as empty lists and absent expression texts as empty
//! strings, so "no dependencies" and "empty dependency list" behave the same.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::CORE_MODULE;
use crate::core::CompilerError;

/// Framework version carried by the `Core` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
}

impl Version {
    /// Create a version from its two components.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A named text marker and its literal replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Marker text as it appears in element expressions
    pub name: String,
    /// Replacement text, may contain other markers
    #[serde(default)]
    pub expression: String,
}

/// Paired install/uninstall command text of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expressions {
    /// Commands emitted by the install script
    #[serde(default)]
    pub install: String,
    /// Commands emitted by the uninstall script
    #[serde(default)]
    pub uninstall: String,
}

/// Smallest schedulable unit of configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Name, unique within the module
    pub name: String,
    /// Informational references, not used for ordering
    #[serde(default)]
    pub references: Vec<String>,
    /// Names of elements of the same module this element requires
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Install and uninstall text
    #[serde(default)]
    pub expressions: Expressions,
}

/// Grouping container for elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section name
    pub name: String,
    /// Elements in declaration order
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A named unit of configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Unique module name
    pub name: String,
    /// Framework version, only set on `Core`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    /// Names of modules this module references
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Placeholders contributed to the shared substitution table
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
    /// Sections in declaration order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Module {
    /// All elements of the module, flattened across sections in declaration order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.sections.iter().flat_map(|section| section.elements.iter())
    }

    /// Find an element by name.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }
}

/// Insertion-ordered collection of modules keyed by name.
///
/// Enumeration order is the order modules were inserted, which makes weight
/// ties in the orderers reproducible between runs.
#[derive(Debug, Clone, Default)]
pub struct ModuleSet {
    modules: IndexMap<String, Module>,
}

impl ModuleSet {
    /// Create an empty module set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from modules, rejecting duplicate names.
    pub fn from_modules(
        modules: impl IntoIterator<Item = Module>,
    ) -> Result<Self, CompilerError> {
        let mut set = Self::new();
        for (index, module) in modules.into_iter().enumerate() {
            if let Err(rejected) = set.insert(module) {
                let first = set.modules.get_index_of(&rejected.name).unwrap_or_default();
                return Err(CompilerError::DuplicateModule {
                    name: rejected.name,
                    first: format!("definition #{}", first + 1),
                    second: format!("definition #{}", index + 1),
                });
            }
        }
        Ok(set)
    }

    /// Insert a module, handing it back unchanged if the name is already taken.
    pub fn insert(&mut self, module: Module) -> Result<(), Module> {
        if self.modules.contains_key(&module.name) {
            return Err(module);
        }
        self.modules.insert(module.name.clone(), module);
        Ok(())
    }

    /// Look up a module by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Look up a module by name, failing with [`CompilerError::ModuleNotFound`].
    pub fn require(&self, name: &str) -> Result<&Module, CompilerError> {
        self.get(name).ok_or_else(|| CompilerError::ModuleNotFound {
            name: name.to_string(),
        })
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the set holds no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Module names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Version of the `Core` module.
    pub fn core_version(&self) -> Result<Version, CompilerError> {
        self.get(CORE_MODULE)
            .ok_or(CompilerError::MissingCoreModule)?
            .version
            .ok_or(CompilerError::MissingCoreVersion)
    }
}
