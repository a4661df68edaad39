//! Generation service - one full pass over an output directory.
//!
//! A pass has two halves:
//! 1. Managed files declared by the project type's preset, rewritten every time
//! 2. Scaffold templates, written only into unpopulated locations

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::materializer::{MaterializationReport, ScaffoldMaterializer},
    },
    domain::{
        AssetTemplate, GenerationContext, MaterializationDecision, OutputLocation, Snapshot,
        presets,
    },
    error::StencilResult,
};

/// Outcome of [`GenerationService::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub output_root: PathBuf,
    /// Managed files written, in declaration order.
    pub managed: Vec<String>,
    /// `None` when sample code is disabled.
    pub scaffold: Option<MaterializationReport>,
}

impl GenerationReport {
    pub fn files_written(&self) -> usize {
        self.managed.len()
            + self
                .scaffold
                .as_ref()
                .map_or(0, MaterializationReport::files_written)
    }
}

/// Drives generation passes against a filesystem.
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Run the project type's preset declarations into `ctx`.
    pub fn declare(&self, ctx: &mut GenerationContext) -> StencilResult<()> {
        presets::declare(ctx)?;
        info!(files = ctx.declarations().len(), "Managed files declared");
        Ok(())
    }

    /// The tree a pass would produce in an empty directory. No disk access.
    pub fn snapshot(
        &self,
        ctx: &GenerationContext,
        templates: &[AssetTemplate],
    ) -> StencilResult<Snapshot> {
        let mut ctx = ctx.clone();
        if ctx.declarations().is_empty() {
            self.declare(&mut ctx)?;
        }
        let mut snapshot = Snapshot::from_context(&ctx);
        if ctx.options.sample_code {
            snapshot.add_templates(templates);
        }
        Ok(snapshot)
    }

    /// Scaffold decisions for the current state of the output tree.
    pub fn plan(
        &self,
        ctx: &GenerationContext,
        templates: &[AssetTemplate],
    ) -> StencilResult<Vec<(OutputLocation, MaterializationDecision)>> {
        ScaffoldMaterializer::new(self.filesystem.as_ref(), ctx.project_type)
            .plan(ctx.root(), templates)
    }

    /// Write managed files, then materialize scaffold templates.
    ///
    /// Declares the preset first when `ctx` holds no declarations yet, so
    /// callers that pre-declare keep full control of the managed set.
    #[instrument(skip_all, fields(root = %ctx.root().display(), project_type = %ctx.project_type))]
    pub fn generate(
        &self,
        ctx: &mut GenerationContext,
        templates: &[AssetTemplate],
    ) -> StencilResult<GenerationReport> {
        let root = ctx.root().to_path_buf();
        if self.filesystem.exists(&root) && !self.filesystem.is_dir(&root) {
            return Err(ApplicationError::OutputNotDirectory { path: root }.into());
        }

        if ctx.declarations().is_empty() {
            self.declare(ctx)?;
        }

        self.filesystem.create_dir_all(&root)?;

        let mut managed = Vec::with_capacity(ctx.declarations().len());
        for declaration in ctx.declarations() {
            let path = declaration.path.under(&root);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &declaration.content)?;
            managed.push(declaration.path.as_str());
        }
        info!(files = managed.len(), "Managed files written");

        let scaffold = if ctx.options.sample_code {
            let report = ScaffoldMaterializer::new(self.filesystem.as_ref(), ctx.project_type)
                .materialize(&root, templates)?;
            Some(report)
        } else {
            info!("Sample code disabled, scaffold skipped");
            None
        };

        Ok(GenerationReport {
            output_root: root,
            managed,
            scaffold,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{FileDeclaration, ProjectOptions, ProjectType, RelativePath};
    use crate::error::StencilError;

    fn context(options: ProjectOptions) -> GenerationContext {
        GenerationContext::new("/out/demo", ProjectType::CdkConstruct, options)
    }

    fn named() -> ProjectOptions {
        ProjectOptions {
            name: "demo".into(),
            ..ProjectOptions::default()
        }
    }

    fn recording_fs(writes: Arc<Mutex<Vec<PathBuf>>>) -> MockFilesystem {
        let dirs = Arc::new(Mutex::new(HashSet::<PathBuf>::new()));
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_is_dir().returning(|_| false);
        let created = Arc::clone(&dirs);
        fs.expect_create_dir_all().returning(move |p| {
            let mut created = created.lock().unwrap();
            for a in p.ancestors() {
                created.insert(a.to_path_buf());
            }
            Ok(())
        });
        fs.expect_write_file().returning(move |p: &Path, _| {
            let parent = p.parent().unwrap().to_path_buf();
            assert!(dirs.lock().unwrap().contains(&parent), "{} written before its directory", p.display());
            writes.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        fs
    }

    #[test]
    fn writes_managed_files_before_scaffold() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let service = GenerationService::new(Box::new(recording_fs(Arc::clone(&writes))));
        let templates = vec![AssetTemplate::new(
            "diagram",
            RelativePath::new("docs/placeholder.drawio"),
            "<mxfile/>",
        )];

        let mut ctx = context(named());
        let report = service.generate(&mut ctx, &templates).unwrap();

        let writes = writes.lock().unwrap();
        assert_eq!(writes.first(), Some(&PathBuf::from("/out/demo/README.md")));
        assert_eq!(writes.last(), Some(&PathBuf::from("/out/demo/docs/placeholder.drawio")));
        assert_eq!(report.files_written(), writes.len());
    }

    #[test]
    fn sample_code_off_skips_scaffold() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let service = GenerationService::new(Box::new(recording_fs(Arc::clone(&writes))));
        let templates = vec![AssetTemplate::new(
            "index",
            RelativePath::new("src/index.ts"),
            "export {};",
        )];

        let mut ctx = context(ProjectOptions {
            sample_code: false,
            ..named()
        });
        let report = service.generate(&mut ctx, &templates).unwrap();

        assert!(report.scaffold.is_none());
        assert!(
            !writes
                .lock()
                .unwrap()
                .iter()
                .any(|p| p.ends_with("src/index.ts"))
        );
    }

    #[test]
    fn pre_declared_files_are_kept() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let service = GenerationService::new(Box::new(recording_fs(Arc::clone(&writes))));

        let mut ctx = context(named());
        ctx.declare(FileDeclaration::lines("CUSTOM.md", ["hand made"]));
        let report = service.generate(&mut ctx, &[]).unwrap();

        assert_eq!(report.managed, vec!["CUSTOM.md".to_string()]);
    }

    #[test]
    fn output_root_must_be_a_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_is_dir().returning(|_| false);
        let service = GenerationService::new(Box::new(fs));

        let err = service.generate(&mut context(named()), &[]).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::OutputNotDirectory { .. })
        ));
    }

    #[test]
    fn snapshot_includes_templates_without_touching_disk() {
        let service = GenerationService::new(Box::new(MockFilesystem::new()));
        let templates = vec![AssetTemplate::new(
            "index",
            RelativePath::new("src/index.ts"),
            "export * from './placeholder';\n",
        )];

        let snap = service.snapshot(&context(named()), &templates).unwrap();

        assert_eq!(snap.get("src/index.ts"), Some("export * from './placeholder';\n"));
        assert!(snap.get("package.json").is_some());
    }
}
