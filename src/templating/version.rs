//! Version tag stamping.

use crate::constants::{VERSION_MARKER, VERSION_TAG_PREFIX};
use crate::models::Version;

/// Format a version as a tag: prefix plus two-digit major and minor.
///
/// ```rust
/// use corelayer::models::Version;
/// use corelayer::templating::version_tag;
///
/// assert_eq!(version_tag(Version::new(3, 7)), "CL0307");
/// assert_eq!(version_tag(Version::new(12, 0)), "CL1200");
/// ```
#[must_use]
pub fn version_tag(version: Version) -> String {
    format!("{VERSION_TAG_PREFIX}{:02}{:02}", version.major, version.minor)
}

/// Replaces the version marker with the tag of one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStamper {
    tag: String,
}

impl VersionStamper {
    /// Create a stamper for `version`.
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            tag: version_tag(version),
        }
    }

    /// The tag written in place of the marker.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Stamp a single line.
    #[must_use]
    pub fn stamp(&self, line: &str) -> String {
        line.replace(VERSION_MARKER, &self.tag)
    }

    /// Stamp every line.
    #[must_use]
    pub fn stamp_all(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|line| if line.contains(VERSION_MARKER) { self.stamp(&line) } else { line })
            .collect()
    }
}
