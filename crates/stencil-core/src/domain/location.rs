//! Output locations and the decisions the materializer takes for them.

use std::fmt;

use crate::domain::{asset::AssetTemplate, common::RelativePath};

/// Logical role of a scaffold directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationKind {
    Source,
    SourceExample,
    Test,
    TestExample,
    IntegTest,
    IntegTestFunctions,
    Docs,
    Examples,
}

impl LocationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::SourceExample => "source-example",
            Self::Test => "test",
            Self::TestExample => "test-example",
            Self::IntegTest => "integ-test",
            Self::IntegTestFunctions => "integ-test-functions",
            Self::Docs => "docs",
            Self::Examples => "examples",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scaffold directory plus the extension that marks it as populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub kind: LocationKind,
    pub dir: RelativePath,
    pub extension: &'static str,
    /// Skipping the gate location skips this one as well.
    pub gate: Option<LocationKind>,
}

impl OutputLocation {
    pub fn new(kind: LocationKind, dir: &str, extension: &'static str) -> Self {
        Self {
            kind,
            dir: RelativePath::new(dir),
            extension,
            gate: None,
        }
    }

    pub fn gated_by(mut self, gate: LocationKind) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Templates owned by this location among `all` locations.
    pub fn assigned<'t>(
        &self,
        templates: &'t [AssetTemplate],
        all: &[OutputLocation],
    ) -> Vec<&'t AssetTemplate> {
        templates
            .iter()
            .filter(|t| owner_of(all, t.target()).is_some_and(|o| o.kind == self.kind))
            .collect()
    }

    /// `true` if `path` counts towards "already populated".
    pub fn matches(&self, path: &RelativePath) -> bool {
        path.has_suffix(self.extension)
    }
}

impl fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/ (*{})", self.dir, self.extension)
    }
}

/// The location with the deepest directory containing `target`.
pub fn owner_of<'l>(
    locations: &'l [OutputLocation],
    target: &RelativePath,
) -> Option<&'l OutputLocation> {
    locations
        .iter()
        .filter(|l| target.is_within(&l.dir))
        .max_by_key(|l| l.dir.as_path().components().count())
}

/// Why a location was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum SkipReason {
    /// At least one matching file already exists.
    Populated {
        #[serde(serialize_with = "serialize_paths")]
        existing: Vec<RelativePath>,
    },
    /// The gating location was skipped.
    GateSkipped { gate: LocationKind },
    /// A migration marker could not be read; nothing is deleted.
    MigrationCheckFailed {
        #[serde(serialize_with = "serialize_path")]
        path: RelativePath,
        message: String,
    },
    /// No template targets this location.
    NothingAssigned,
}

/// Outcome of the populated check for one location.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "decision", rename_all = "kebab-case")]
pub enum MaterializationDecision {
    Skip(SkipReason),
    Write {
        /// Legacy default files deleted before writing.
        #[serde(serialize_with = "serialize_paths")]
        retire: Vec<RelativePath>,
    },
}

impl MaterializationDecision {
    pub fn write() -> Self {
        Self::Write { retire: Vec::new() }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }

    pub fn is_skip(&self) -> bool {
        !self.is_write()
    }
}

impl fmt::Display for MaterializationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write { retire } if retire.is_empty() => f.write_str("write"),
            Self::Write { retire } => write!(f, "write (retiring {} legacy file(s))", retire.len()),
            Self::Skip(SkipReason::Populated { existing }) => {
                write!(f, "skip: populated ({} file(s))", existing.len())
            }
            Self::Skip(SkipReason::GateSkipped { gate }) => write!(f, "skip: {gate} was skipped"),
            Self::Skip(SkipReason::MigrationCheckFailed { path, .. }) => {
                write!(f, "skip: could not inspect {path}")
            }
            Self::Skip(SkipReason::NothingAssigned) => f.write_str("skip: nothing to write"),
        }
    }
}

fn serialize_path<S: serde::Serializer>(p: &RelativePath, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&p.as_str())
}

fn serialize_paths<S: serde::Serializer>(ps: &[RelativePath], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(ps.iter().map(RelativePath::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_to_deepest_owner() {
        let templates = vec![
            AssetTemplate::new("a", RelativePath::new("integ-tests/integ.placeholder.ts"), ""),
            AssetTemplate::new("b", RelativePath::new("integ-tests/functions/test-handler.ts"), ""),
        ];
        let all = vec![
            OutputLocation::new(LocationKind::IntegTest, "integ-tests", ".ts"),
            OutputLocation::new(LocationKind::IntegTestFunctions, "integ-tests/functions", ".ts"),
        ];
        let names: Vec<_> = all[0].assigned(&templates, &all).iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["a"]);
        let names: Vec<_> = all[1].assigned(&templates, &all).iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn deeper_target_falls_back_to_nearest_location() {
        let all = vec![OutputLocation::new(LocationKind::Examples, "examples", ".ts")];
        let owner = owner_of(&all, &RelativePath::new("examples/simple/main.ts"));
        assert_eq!(owner.map(|l| l.kind), Some(LocationKind::Examples));
        assert!(owner_of(&all, &RelativePath::new("README.md")).is_none());
    }

    #[test]
    fn decision_json_shape() {
        let d = MaterializationDecision::Skip(SkipReason::Populated {
            existing: vec![RelativePath::new("src/index.ts")],
        });
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["decision"], "skip");
        assert_eq!(json["reason"], "populated");
        assert_eq!(json["existing"][0], "src/index.ts");
    }
}
