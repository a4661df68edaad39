use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to stay inside the output root.
///
/// Invariant: never absolute, never contains `..`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is absolute or climbs out of the root (use
    /// `try_new` for fallible construction). Intended for static tables.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        match Self::try_new(path) {
            Ok(p) => p,
            Err(e) => panic!("invalid RelativePath: {e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::PathEscapesRoot {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    /// Parent directory; the empty path for top-level files.
    pub fn parent(&self) -> RelativePath {
        Self(self.0.parent().map(Path::to_path_buf).unwrap_or_default())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }

    /// `true` if the final component ends with `suffix` (e.g. `.test.ts`).
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.0
            .file_name()
            .is_some_and(|n| n.as_encoded_bytes().ends_with(suffix.as_bytes()))
    }

    /// `true` if this path lies strictly below `dir`.
    pub fn is_within(&self, dir: &RelativePath) -> bool {
        self.0 != dir.0 && self.0.starts_with(&dir.0)
    }

    /// Resolve against an absolute root.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash rendering, stable across platforms.
    pub fn as_str(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_paths() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn rejects_parent_components() {
        assert!(matches!(
            RelativePath::try_new("src/../../outside.ts"),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn parent_of_nested_file() {
        let p = RelativePath::new("integ-tests/functions/test-handler.ts");
        assert_eq!(p.parent(), RelativePath::new("integ-tests/functions"));
        assert_eq!(RelativePath::new("README.md").parent().as_str(), "");
    }

    #[test]
    fn suffix_matches_compound_extension() {
        let p = RelativePath::new("test/index.test.ts");
        assert!(p.has_suffix(".ts"));
        assert!(p.has_suffix(".test.ts"));
        assert!(!p.has_suffix(".drawio"));
    }

    #[cfg(unix)]
    #[test]
    fn suffix_ignores_non_utf8_stem() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let p = RelativePath::new(Path::new("src").join(OsStr::from_bytes(b"caf\xe9.ts")));
        assert!(p.file_name().is_none());
        assert!(p.has_suffix(".ts"));
        assert!(!p.has_suffix(".drawio"));
    }

    #[test]
    fn within_is_strict() {
        let dir = RelativePath::new("examples");
        assert!(RelativePath::new("examples/simple/main.ts").is_within(&dir));
        assert!(!RelativePath::new("examples").is_within(&dir));
        assert!(!RelativePath::new("examples-old/main.ts").is_within(&dir));
    }

    #[test]
    fn display_uses_forward_slashes() {
        let p = RelativePath::new(PathBuf::from("examples").join("simple").join("main.ts"));
        assert_eq!(p.to_string(), "examples/simple/main.ts");
    }
}
