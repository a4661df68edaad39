//! Scaffold templates: static text copied verbatim into a generated project.

use std::fmt;

use crate::domain::common::RelativePath;

/// One scaffold file, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTemplate {
    name: String,
    target: RelativePath,
    content: String,
}

impl AssetTemplate {
    pub fn new(name: impl Into<String>, target: RelativePath, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target,
            content: content.into(),
        }
    }

    /// Logical name, e.g. `"placeholder test"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path relative to the output root.
    pub fn target(&self) -> &RelativePath {
        &self.target
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for AssetTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.target)
    }
}

/// Static manifest row: which asset file feeds which target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSpec {
    pub name: &'static str,
    pub asset_file: &'static str,
    pub target: &'static str,
}

impl AssetSpec {
    pub const fn new(name: &'static str, asset_file: &'static str, target: &'static str) -> Self {
        Self {
            name,
            asset_file,
            target,
        }
    }
}
