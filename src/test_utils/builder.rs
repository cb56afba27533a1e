//! Fluent builders for modules and elements
//!
//! Keeps unit tests focused on the dependency shape under test instead of
//! struct literals.

use crate::constants::CORE_MODULE;
use crate::models::{Element, Expressions, Module, Placeholder, Section, Version};

/// Builder for a single [`Element`].
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    /// Start an element with no dependencies and empty text.
    pub fn new(name: &str) -> Self {
        Self {
            element: Element {
                name: name.to_string(),
                references: Vec::new(),
                dependencies: Vec::new(),
                expressions: Expressions::default(),
            },
        }
    }

    /// Add dependencies on other elements.
    pub fn depends_on<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.element.dependencies.extend(names.into_iter().map(str::to_string));
        self
    }

    /// Add informational references.
    pub fn references<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.element.references.extend(names.into_iter().map(str::to_string));
        self
    }

    /// Set the install text.
    pub fn install(mut self, text: &str) -> Self {
        self.element.expressions.install = text.to_string();
        self
    }

    /// Set the uninstall text.
    pub fn uninstall(mut self, text: &str) -> Self {
        self.element.expressions.uninstall = text.to_string();
        self
    }

    /// Finish the element.
    pub fn build(self) -> Element {
        self.element
    }
}

/// Builder for a [`Module`].
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    /// Start an empty module.
    pub fn new(name: &str) -> Self {
        Self {
            module: Module {
                name: name.to_string(),
                version: None,
                dependencies: Vec::new(),
                placeholders: Vec::new(),
                sections: Vec::new(),
            },
        }
    }

    /// Start the `Core` module with a version.
    pub fn core(major: u32, minor: u32) -> Self {
        Self::new(CORE_MODULE).version(major, minor)
    }

    /// Set the module version.
    pub fn version(mut self, major: u32, minor: u32) -> Self {
        self.module.version = Some(Version::new(major, minor));
        self
    }

    /// Add dependencies on other modules.
    pub fn depends_on<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.module.dependencies.extend(names.into_iter().map(str::to_string));
        self
    }

    /// Add a placeholder.
    pub fn placeholder(mut self, name: &str, expression: &str) -> Self {
        self.module.placeholders.push(Placeholder {
            name: name.to_string(),
            expression: expression.to_string(),
        });
        self
    }

    /// Add a section holding `elements`.
    pub fn section(mut self, name: &str, elements: Vec<Element>) -> Self {
        self.module.sections.push(Section {
            name: name.to_string(),
            elements,
        });
        self
    }

    /// Finish the module.
    pub fn build(self) -> Module {
        self.module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_fill_every_field() {
        let module = ModuleBuilder::core(2, 1)
            .depends_on(["Base"])
            .placeholder("NSIP", "10.0.0.1")
            .section(
                "base",
                vec![
                    ElementBuilder::new("mode")
                        .depends_on(["features"])
                        .references(["docs"])
                        .install("enable ns mode L3")
                        .uninstall("disable ns mode L3")
                        .build(),
                ],
            )
            .build();

        assert_eq!(module.name, "Core");
        assert_eq!(module.version, Some(Version::new(2, 1)));
        assert_eq!(module.dependencies, vec!["Base"]);
        assert_eq!(module.placeholders[0].name, "NSIP");

        let mode = module.element("mode").unwrap();
        assert_eq!(mode.dependencies, vec!["features"]);
        assert_eq!(mode.references, vec!["docs"]);
        assert_eq!(mode.expressions.install, "enable ns mode L3");
        assert_eq!(mode.expressions.uninstall, "disable ns mode L3");
    }
}
