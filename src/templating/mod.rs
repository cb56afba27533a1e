//! Text substitution for emitted commands.
//!
//! Two substitutions run over the element text of both scripts, in this order:
//!
//! 1. [`PlaceholderTable::resolve`] replaces placeholder markers until a fixed
//!    point is reached (nested placeholders are allowed) or fails with
//!    [`CompilerError::UnresolvedPlaceholders`](crate::core::CompilerError::UnresolvedPlaceholders).
//! 2. [`VersionStamper`] replaces `_V_` with the `Core` version tag
//!    (`CL` + `MM` + `mm`).
//!
//! Both are plain substring replacement. There is no expression language:
//! markers are matched exactly and case-sensitively. Module banners are never
//! passed through either step.

pub mod placeholders;
pub mod version;

pub use placeholders::PlaceholderTable;
pub use version::{VersionStamper, version_tag};
