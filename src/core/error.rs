//! Error handling for the CoreLayer compiler
//!
//! This module provides the error type shared by every compilation stage and
//! the user-facing reporting layer built on top of it. The design follows two
//! rules:
//! 1. **Strongly-typed errors** so callers and tests can match the exact failure
//! 2. **User-friendly messages** that name the offending module, element, or
//!    placeholder and suggest how to fix the module definitions
//!
//! # Error Categories
//!
//! - **Configuration**: [`CompilerError::DuplicatePlaceholder`],
//!   [`CompilerError::MissingCoreModule`], [`CompilerError::UnresolvedPlaceholders`], ...
//! - **Structure**: [`CompilerError::UnresolvedDependency`], [`CompilerError::ElementNotFound`]
//! - **Input**: [`CompilerError::ModuleParseError`], [`CompilerError::SearchPathNotFound`]
//! - **I/O**: [`CompilerError::IoError`]
//!
//! Dependency cycles are not errors: they are logged and counting continues,
//! see [`crate::resolver::weights`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use corelayer::core::{CompilerError, user_friendly_error};
//!
//! let error = CompilerError::MissingCoreModule;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for compiler operations
///
/// Every fatal condition of a compilation run maps to exactly one variant.
/// Variants carry the names needed to locate the problem in the module files.
#[derive(Error, Debug)]
pub enum CompilerError {
    /// Two modules define a placeholder with the same marker name
    ///
    /// Placeholders from all modules are merged into one substitution table, so
    /// a marker may only be defined once per run.
    #[error("Duplicate placeholder '{name}' defined in modules '{first_module}' and '{second_module}'")]
    DuplicatePlaceholder {
        /// The placeholder marker defined twice
        name: String,
        /// Module that defined the marker first
        first_module: String,
        /// Module that redefined it
        second_module: String,
    },

    /// A placeholder definition cannot be used as a marker
    #[error("Invalid placeholder in module '{module}': {reason}")]
    InvalidPlaceholder {
        /// Module that defines the placeholder
        module: String,
        /// Why the placeholder was rejected
        reason: String,
    },

    /// No module named `Core` was loaded
    #[error("Module 'Core' not found")]
    MissingCoreModule,

    /// The `Core` module has no version block
    #[error("Module 'Core' does not define a version")]
    MissingCoreVersion,

    /// Placeholder markers survived the substitution pass budget
    ///
    /// Either a marker is used but never defined, or placeholder expressions
    /// reference each other in a loop.
    #[error("Unresolved placeholders after {passes} passes: {}", .markers.join(", "))]
    UnresolvedPlaceholders {
        /// Markers still present in the output
        markers: Vec<String>,
        /// Number of passes that were made
        passes: usize,
    },

    /// Two module files declare the same module name
    #[error("Duplicate module '{name}' ({first} and {second})")]
    DuplicateModule {
        /// The module name declared twice
        name: String,
        /// Where the first declaration came from
        first: String,
        /// Where the second declaration came from
        second: String,
    },

    /// Two elements of one module share a name
    #[error("Duplicate element '{element}' in module '{module}'")]
    DuplicateElement {
        /// Module containing the duplicate
        module: String,
        /// The element name declared twice
        element: String,
    },

    /// A dependency names something that does not exist in its scope
    ///
    /// Module dependencies must name loaded modules; element dependencies must
    /// name elements of the same module (or elements already ordered by an
    /// earlier module).
    #[error("'{item}' in {scope} depends on unknown '{dependency}'")]
    UnresolvedDependency {
        /// Where the lookup happened (`modules` or `module 'X'`)
        scope: String,
        /// The item declaring the dependency
        item: String,
        /// The name that could not be found
        dependency: String,
    },

    /// An ordered element name has no definition in its module
    #[error("Element '{element}' not found in module '{module}'")]
    ElementNotFound {
        /// Module being emitted
        module: String,
        /// The missing element
        element: String,
    },

    /// An ordered module name has no definition in the module set
    #[error("Module '{name}' not found")]
    ModuleNotFound {
        /// The missing module
        name: String,
    },

    /// A module file could not be deserialized
    #[error("Invalid module file syntax in {file}")]
    ModuleParseError {
        /// Path to the module file
        file: String,
        /// Parser message
        reason: String,
    },

    /// The search path does not exist or is not a directory
    #[error("Search path not found: {path}")]
    SearchPathNotFound {
        /// The path given on the command line
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for CompilerError {
    fn clone(&self) -> Self {
        match self {
            Self::DuplicatePlaceholder {
                name,
                first_module,
                second_module,
            } => Self::DuplicatePlaceholder {
                name: name.clone(),
                first_module: first_module.clone(),
                second_module: second_module.clone(),
            },
            Self::InvalidPlaceholder {
                module,
                reason,
            } => Self::InvalidPlaceholder {
                module: module.clone(),
                reason: reason.clone(),
            },
            Self::MissingCoreModule => Self::MissingCoreModule,
            Self::MissingCoreVersion => Self::MissingCoreVersion,
            Self::UnresolvedPlaceholders {
                markers,
                passes,
            } => Self::UnresolvedPlaceholders {
                markers: markers.clone(),
                passes: *passes,
            },
            Self::DuplicateModule {
                name,
                first,
                second,
            } => Self::DuplicateModule {
                name: name.clone(),
                first: first.clone(),
                second: second.clone(),
            },
            Self::DuplicateElement {
                module,
                element,
            } => Self::DuplicateElement {
                module: module.clone(),
                element: element.clone(),
            },
            Self::UnresolvedDependency {
                scope,
                item,
                dependency,
            } => Self::UnresolvedDependency {
                scope: scope.clone(),
                item: item.clone(),
                dependency: dependency.clone(),
            },
            Self::ElementNotFound {
                module,
                element,
            } => Self::ElementNotFound {
                module: module.clone(),
                element: element.clone(),
            },
            Self::ModuleNotFound {
                name,
            } => Self::ModuleNotFound {
                name: name.clone(),
            },
            Self::ModuleParseError {
                file,
                reason,
            } => Self::ModuleParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::SearchPathNotFound {
                path,
            } => Self::SearchPathNotFound {
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error is not Clone
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`CompilerError`] and adds optional details and a
/// suggestion for resolution. This is how the CLI presents failures.
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying compiler error
    pub error: CompilerError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: CompilerError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`CompilerError`] anywhere in the error chain (so `.context(...)`
/// wrappers added by outer layers do not hide it), then [`std::io::Error`], and
/// falls back to a generic context carrying the full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(compiler_error) = error.chain().find_map(|e| e.downcast_ref::<CompilerError>()) {
        return create_error_context(compiler_error.clone());
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CompilerError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the output directory is writable and the module files are readable")
                .with_details("The compiler did not have permission to read or write a file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CompilerError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();

    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CompilerError::Other {
        message,
    })
}

fn create_error_context(error: CompilerError) -> ErrorContext {
    match &error {
        CompilerError::DuplicatePlaceholder { name, first_module, second_module } => {
            let suggestion = format!(
                "Rename or remove placeholder '{name}' in module '{second_module}' or '{first_module}'"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Placeholders of all modules share one substitution table, so each marker may be defined only once")
        }

        CompilerError::InvalidPlaceholder { .. } => ErrorContext::new(error)
            .with_suggestion("Give every placeholder a non-empty name"),

        CompilerError::MissingCoreModule => ErrorContext::new(error)
            .with_suggestion("Add a module file with 'name: Core' and a 'version' block to the search path")
            .with_details("The version tag stamped into the scripts is taken from the Core module"),

        CompilerError::MissingCoreVersion => ErrorContext::new(error)
            .with_suggestion("Add 'version: { major: 1, minor: 0 }' to the Core module"),

        CompilerError::UnresolvedPlaceholders { markers, .. } => {
            let details = format!(
                "Markers left in the output: {}. A marker is either used without being defined, or placeholder expressions reference each other in a loop",
                markers.join(", ")
            );
            ErrorContext::new(error)
                .with_suggestion("Define the missing placeholders or break the reference loop between their expressions")
                .with_details(details)
        }

        CompilerError::DuplicateModule { name, .. } => {
            let suggestion = format!("Keep exactly one module file declaring 'name: {name}'");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        CompilerError::DuplicateElement { element, module } => {
            let suggestion = format!("Rename one of the '{element}' elements in module '{module}'");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Elements are flattened across all sections of a module before ordering, so names must be unique per module")
        }

        CompilerError::UnresolvedDependency { dependency, .. } => {
            let suggestion = format!("Define '{dependency}' or remove it from the dependency list");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Element dependencies must name elements of the same module; module dependencies must name loaded modules")
        }

        CompilerError::ElementNotFound { .. } | CompilerError::ModuleNotFound { .. } => {
            ErrorContext::new(error)
                .with_details("The emission order references a definition that was not loaded")
        }

        CompilerError::ModuleParseError { file, reason } => {
            let suggestion = format!("Check the YAML syntax in {file}");
            let details = reason.clone();
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }

        CompilerError::SearchPathNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the directory that contains the module YAML files"),

        CompilerError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the values in corelayer.toml and the command line flags"),

        CompilerError::IoError(_) | CompilerError::Other { .. } => ErrorContext::new(error),
    }
}
