//! Scaffold materializer.
//!
//! Writes sample sources and tests into the output tree, one location at a
//! time, without ever overwriting something the user has started:
//! 1. Skip a location whose gate location was skipped
//! 2. Skip a location that already holds a file with its extension, unless
//!    every such file is a recognised legacy default
//! 3. Otherwise create the directory, retire legacy files, write templates
//!
//! All decisions are taken up front ([`ScaffoldMaterializer::plan`]) so a dry
//! run sees exactly what a real run would do.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{
        AssetTemplate, DomainError, LegacyDefault, LocationKind, MaterializationDecision,
        OutputLocation, ProjectType, RelativePath, SkipReason, migration, owner_of,
    },
    error::StencilResult,
};

/// What happened to one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationOutcome {
    pub kind: LocationKind,
    pub dir: String,
    pub decision: MaterializationDecision,
    pub written: Vec<String>,
}

/// Result of one materialization pass, in location order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializationReport {
    pub outcomes: Vec<LocationOutcome>,
}

impl MaterializationReport {
    pub fn files_written(&self) -> usize {
        self.outcomes.iter().map(|o| o.written.len()).sum()
    }

    pub fn files_retired(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.decision {
                MaterializationDecision::Write { retire } => retire.len(),
                MaterializationDecision::Skip(_) => 0,
            })
            .sum()
    }

    pub fn decision_for(&self, kind: LocationKind) -> Option<&MaterializationDecision> {
        self.outcomes
            .iter()
            .find(|o| o.kind == kind)
            .map(|o| &o.decision)
    }

    pub fn written(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .flat_map(|o| o.written.iter().map(String::as_str))
    }
}

/// Conditional writer for a project type's scaffold locations.
pub struct ScaffoldMaterializer<'a> {
    fs: &'a dyn Filesystem,
    locations: Vec<OutputLocation>,
    migrations: &'static [LegacyDefault],
}

impl<'a> ScaffoldMaterializer<'a> {
    pub fn new(fs: &'a dyn Filesystem, project_type: ProjectType) -> Self {
        Self::with_locations(fs, project_type.locations(), project_type.migrations())
    }

    /// Materializer over an explicit location list and migration table.
    pub fn with_locations(
        fs: &'a dyn Filesystem,
        locations: Vec<OutputLocation>,
        migrations: &'static [LegacyDefault],
    ) -> Self {
        Self {
            fs,
            locations,
            migrations,
        }
    }

    pub fn locations(&self) -> &[OutputLocation] {
        &self.locations
    }

    /// Decide every location without modifying the tree.
    #[instrument(skip_all, fields(root = %output_root.display()))]
    pub fn plan(
        &self,
        output_root: &Path,
        templates: &[AssetTemplate],
    ) -> StencilResult<Vec<(OutputLocation, MaterializationDecision)>> {
        for t in templates {
            if owner_of(&self.locations, t.target()).is_none() {
                return Err(DomainError::UnassignedTemplate {
                    name: t.name().to_string(),
                    path: t.target().as_str(),
                }
                .into());
            }
        }

        let mut decided: HashMap<LocationKind, bool> = HashMap::new();
        let mut plan = Vec::with_capacity(self.locations.len());

        for location in &self.locations {
            let decision = self.decide(output_root, location, templates, &decided)?;
            debug!(location = %location.kind, %decision, "Location decided");
            decided.insert(location.kind, decision.is_write());
            plan.push((location.clone(), decision));
        }

        Ok(plan)
    }

    /// Plan, then carry out every `Write` decision.
    ///
    /// The first failing filesystem call aborts the pass.
    #[instrument(skip_all, fields(root = %output_root.display()))]
    pub fn materialize(
        &self,
        output_root: &Path,
        templates: &[AssetTemplate],
    ) -> StencilResult<MaterializationReport> {
        let plan = self.plan(output_root, templates)?;
        let mut report = MaterializationReport::default();

        for (location, decision) in plan {
            let mut written = Vec::new();

            if let MaterializationDecision::Write { retire } = &decision {
                self.fs.create_dir_all(&location.dir.under(output_root))?;

                for legacy in retire {
                    self.fs.remove_file(&legacy.under(output_root))?;
                    info!(path = %legacy, "Retired legacy default");
                }

                for template in location.assigned(templates, &self.locations) {
                    let path = template.target().under(output_root);
                    if let Some(parent) = path.parent() {
                        self.fs.create_dir_all(parent)?;
                    }
                    self.fs.write_file(&path, template.content())?;
                    written.push(template.target().as_str());
                }

                info!(location = %location.kind, files = written.len(), "Location materialized");
            } else {
                info!(location = %location.kind, %decision, "Location skipped");
            }

            report.outcomes.push(LocationOutcome {
                kind: location.kind,
                dir: location.dir.as_str(),
                decision,
                written,
            });
        }

        Ok(report)
    }

    fn decide(
        &self,
        root: &Path,
        location: &OutputLocation,
        templates: &[AssetTemplate],
        decided: &HashMap<LocationKind, bool>,
    ) -> StencilResult<MaterializationDecision> {
        if let Some(gate) = location.gate {
            if !decided.get(&gate).copied().unwrap_or(false) {
                return Ok(MaterializationDecision::Skip(SkipReason::GateSkipped { gate }));
            }
        }

        if location.assigned(templates, &self.locations).is_empty() {
            return Ok(MaterializationDecision::Skip(SkipReason::NothingAssigned));
        }

        let existing = self.existing_files(root, location)?;
        if existing.is_empty() {
            return Ok(MaterializationDecision::write());
        }

        let mut retire = Vec::new();
        for legacy in migration::for_location(self.migrations, location.kind) {
            let path = legacy.path_in(&location.dir);
            if !existing.contains(&path) {
                continue;
            }
            let content = if legacy.marker.needs_content() {
                match self.fs.read_to_string(&path.under(root)) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        warn!(path = %path, error = %e, "Could not inspect legacy marker, leaving location untouched");
                        return Ok(MaterializationDecision::Skip(
                            SkipReason::MigrationCheckFailed {
                                path,
                                message: e.to_string(),
                            },
                        ));
                    }
                }
            } else {
                None
            };
            if legacy.marker.matches(content.as_deref()) {
                debug!(path = %path, version = legacy.version, "Legacy default recognised");
                retire.push(path);
            }
        }

        if !retire.is_empty() && existing.iter().all(|p| retire.contains(p)) {
            Ok(MaterializationDecision::Write { retire })
        } else {
            Ok(MaterializationDecision::Skip(SkipReason::Populated { existing }))
        }
    }

    /// Files under the location matching its extension, relative to `root`.
    fn existing_files(
        &self,
        root: &Path,
        location: &OutputLocation,
    ) -> StencilResult<Vec<RelativePath>> {
        let dir = location.dir.under(root);
        if !self.fs.is_dir(&dir) {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for file in self.fs.files_under(&dir)? {
            let Ok(rel) = file.strip_prefix(root) else {
                continue;
            };
            let rel = RelativePath::try_new(rel)?;
            if location.matches(&rel) {
                found.push(rel);
            }
        }
        found.sort();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::{Sequence, predicate::eq};

    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::error::StencilError;

    fn root() -> PathBuf {
        PathBuf::from("/out")
    }

    fn single_location() -> Vec<OutputLocation> {
        vec![OutputLocation::new(LocationKind::Docs, "docs", ".drawio")]
    }

    fn diagram() -> Vec<AssetTemplate> {
        vec![AssetTemplate::new(
            "diagram",
            RelativePath::new("docs/placeholder.drawio"),
            "<mxfile/>",
        )]
    }

    #[test]
    fn creates_directory_before_writing() {
        let mut fs = MockFilesystem::new();
        let mut seq = Sequence::new();

        fs.expect_is_dir().returning(|_| false);
        fs.expect_create_dir_all()
            .with(eq(PathBuf::from("/out/docs")))
            .times(1..)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .with(eq(PathBuf::from("/out/docs/placeholder.drawio")), eq("<mxfile/>"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let m = ScaffoldMaterializer::with_locations(&fs, single_location(), &[]);
        let report = m.materialize(&root(), &diagram()).unwrap();

        assert_eq!(report.files_written(), 1);
        assert_eq!(
            report.written().collect::<Vec<_>>(),
            vec!["docs/placeholder.drawio"]
        );
    }

    #[test]
    fn populated_location_is_never_written() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_files_under()
            .returning(|_| Ok(vec![PathBuf::from("/out/docs/arch/custom.drawio")]));
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let m = ScaffoldMaterializer::with_locations(&fs, single_location(), &[]);
        let report = m.materialize(&root(), &diagram()).unwrap();

        assert_eq!(report.files_written(), 0);
        assert!(matches!(
            report.decision_for(LocationKind::Docs),
            Some(MaterializationDecision::Skip(SkipReason::Populated { existing }))
                if existing == &vec![RelativePath::new("docs/arch/custom.drawio")]
        ));
    }

    #[test]
    fn files_with_other_extensions_do_not_count() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_files_under()
            .returning(|_| Ok(vec![PathBuf::from("/out/docs/README.md")]));

        let m = ScaffoldMaterializer::with_locations(&fs, single_location(), &[]);
        let plan = m.plan(&root(), &diagram()).unwrap();

        assert_eq!(plan[0].1, MaterializationDecision::write());
    }

    #[test]
    fn write_failure_aborts_the_pass() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only file system".into(),
            }
            .into())
        });

        let m = ScaffoldMaterializer::with_locations(&fs, single_location(), &[]);
        let err = m.materialize(&root(), &diagram()).unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn skipped_gate_skips_nested_location() {
        let locations = vec![
            OutputLocation::new(LocationKind::IntegTest, "integ-tests", ".ts"),
            OutputLocation::new(LocationKind::IntegTestFunctions, "integ-tests/functions", ".ts")
                .gated_by(LocationKind::IntegTest),
        ];
        let templates = vec![
            AssetTemplate::new("integ", RelativePath::new("integ-tests/integ.placeholder.ts"), "a"),
            AssetTemplate::new(
                "handler",
                RelativePath::new("integ-tests/functions/test-handler.ts"),
                "b",
            ),
        ];

        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .with(eq(PathBuf::from("/out/integ-tests")))
            .returning(|_| true);
        fs.expect_files_under()
            .returning(|_| Ok(vec![PathBuf::from("/out/integ-tests/integ.mine.ts")]));

        let m = ScaffoldMaterializer::with_locations(&fs, locations, &[]);
        let plan = m.plan(&root(), &templates).unwrap();

        assert!(matches!(
            plan[1].1,
            MaterializationDecision::Skip(SkipReason::GateSkipped {
                gate: LocationKind::IntegTest
            })
        ));
    }

    #[test]
    fn unreadable_marker_skips_and_keeps_files() {
        let locations = vec![OutputLocation::new(LocationKind::Source, "src", ".ts")];
        let templates = vec![AssetTemplate::new("index", RelativePath::new("src/index.ts"), "x")];

        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_files_under()
            .returning(|_| Ok(vec![PathBuf::from("/out/src/index.ts")]));
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });
        fs.expect_remove_file().never();
        fs.expect_write_file().never();

        let m = ScaffoldMaterializer::with_locations(&fs, locations, migration::PROJEN_HELLO);
        let report = m.materialize(&root(), &templates).unwrap();

        assert!(matches!(
            report.decision_for(LocationKind::Source),
            Some(MaterializationDecision::Skip(SkipReason::MigrationCheckFailed { .. }))
        ));
    }

    #[test]
    fn legacy_default_is_retired_before_writing() {
        let locations = vec![OutputLocation::new(LocationKind::Test, "test", ".ts")];
        let templates = vec![AssetTemplate::new(
            "test",
            RelativePath::new("test/index.test.ts"),
            "test('x', () => {});",
        )];

        let mut fs = MockFilesystem::new();
        let mut seq = Sequence::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_files_under()
            .returning(|_| Ok(vec![PathBuf::from("/out/test/hello.test.ts")]));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_remove_file()
            .with(eq(PathBuf::from("/out/test/hello.test.ts")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let m = ScaffoldMaterializer::with_locations(&fs, locations, migration::PROJEN_HELLO);
        let report = m.materialize(&root(), &templates).unwrap();

        assert_eq!(report.files_retired(), 1);
        assert_eq!(report.files_written(), 1);
    }

    #[test]
    fn unowned_template_is_rejected() {
        let fs = MockFilesystem::new();
        let m = ScaffoldMaterializer::with_locations(&fs, single_location(), &[]);
        let stray = vec![AssetTemplate::new("stray", RelativePath::new("lib/x.ts"), "")];

        let err = m.plan(&root(), &stray).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::UnassignedTemplate { .. })
        ));
    }
}
