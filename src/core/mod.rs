//! Core types for the CoreLayer compiler
//!
//! This module holds the error type every stage returns and the reporting
//! helpers the CLI uses to turn failures into readable messages.
//!
//! - [`CompilerError`] - Enumerated failure modes of a compilation run
//! - [`ErrorContext`] - User-friendly wrapper with details and suggestions
//! - [`user_friendly_error`] - Convert any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! Pure pipeline stages return `Result<T, CompilerError>` so tests can match the
//! exact variant; outer layers (loader, writer, CLI) use [`anyhow::Result`] and
//! attach file paths with `.with_context(...)`.

pub mod error;

pub use error::{CompilerError, ErrorContext, user_friendly_error};
