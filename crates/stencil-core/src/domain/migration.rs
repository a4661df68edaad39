//! Versioned table of legacy defaults that may be replaced in place.
//!
//! A location populated by an older generator's default output would
//! otherwise be skipped forever. Each [`LegacyDefault`] names the file that
//! identifies such output and how to recognise it. The materializer retires
//! the matched files only when that leaves the location empty.

use crate::domain::{common::RelativePath, location::LocationKind};

/// How a marker file is recognised as a legacy default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The file exists at all.
    Present,
    /// The file contains this string.
    Contains(&'static str),
}

impl Marker {
    /// Whether the marker rule needs the file's content.
    pub fn needs_content(self) -> bool {
        matches!(self, Self::Contains(_))
    }

    pub fn matches(self, content: Option<&str>) -> bool {
        match self {
            Self::Present => true,
            Self::Contains(sentinel) => content.is_some_and(|c| c.contains(sentinel)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyDefault {
    /// `<generator>/<version>` of the default being replaced.
    pub version: &'static str,
    pub location: LocationKind,
    /// File name inside the location directory.
    pub file: &'static str,
    pub marker: Marker,
}

impl LegacyDefault {
    pub fn path_in(&self, dir: &RelativePath) -> RelativePath {
        RelativePath::new(dir.as_path().join(self.file))
    }
}

/// projen's stock construct library sample (`Hello` class and its test).
pub const PROJEN_HELLO: &[LegacyDefault] = &[
    LegacyDefault {
        version: "projen-hello/v0",
        location: LocationKind::Source,
        file: "index.ts",
        marker: Marker::Contains("export class Hello"),
    },
    LegacyDefault {
        version: "projen-hello/v0",
        location: LocationKind::Test,
        file: "hello.test.ts",
        marker: Marker::Present,
    },
];

/// Entries of `table` that apply to `kind`.
pub fn for_location(
    table: &'static [LegacyDefault],
    kind: LocationKind,
) -> impl Iterator<Item = &'static LegacyDefault> {
    table.iter().filter(move |m| m.location == kind)
}
