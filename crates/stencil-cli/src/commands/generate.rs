//! Implementation of the `stencil generate` command.
//!
//! Responsibility: turn CLI arguments and config into a
//! `GenerationContext`, call the core generation service, and display the
//! results. No generation logic lives here.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use stencil_adapters::{LocalFilesystem, resolve_asset_source};
use stencil_core::{
    application::{GenerationReport, GenerationService},
    domain::{
        AssetTemplate, GenerationContext, LocationKind, MaterializationDecision, ProjectOptions,
        ProjectOverrides, ProjectType,
    },
};

use crate::{
    cli::{GenerateArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute `stencil generate`.
///
/// 1. Resolve project type, output root and options
/// 2. Load scaffold templates from the selected asset source
/// 3. `--dry-run`: report the plan and stop
/// 4. Run the generation pass and report what was written
#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project_type = resolve_project_type(args.project_type.as_deref(), &config)?;
    let root = resolve_root(&args.dir)?;
    let options = resolve_options(&root, &config, &args.set)?;

    debug!(
        project_type = %project_type,
        root = %root.display(),
        name = %options.name,
        sample_code = options.sample_code,
        "Generation resolved"
    );

    let templates = load_templates(project_type, &options, &args, &config)?;
    let service = GenerationService::new(Box::new(LocalFilesystem::new()));
    let mut ctx = GenerationContext::new(root, project_type, options);

    if args.dry_run {
        return dry_run(&service, &mut ctx, &templates, &output);
    }

    if !output.is_json() {
        output.header(&format!(
            "Generating {} project in {}",
            project_type,
            ctx.root().display()
        ))?;
    }

    let report = service.generate(&mut ctx, &templates)?;
    info!(files = report.files_written(), "Generation finished");

    if output.is_json() {
        return output.json(&report);
    }
    print_report(&report, global.verbose > 0, &output)
}

fn resolve_project_type(arg: Option<&str>, config: &AppConfig) -> CliResult<ProjectType> {
    let id = arg.unwrap_or(&config.defaults.project_type);
    Ok(id.parse::<ProjectType>()?)
}

/// Absolute output root with `.` segments removed.
pub fn resolve_root(dir: &Path) -> CliResult<PathBuf> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(dir)
    };
    Ok(absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

/// Defaults, then config `[project]`, then `--set`; name falls back to the
/// output directory name.
fn resolve_options(root: &Path, config: &AppConfig, set: &[String]) -> CliResult<ProjectOptions> {
    let mut cli = ProjectOverrides::default();
    for raw in set {
        cli.assign(raw)?;
    }
    let mut overrides = config.project.clone().overlay(cli);

    if overrides.name.is_none() {
        overrides.name = root
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from);
    }

    Ok(ProjectOptions::default().merge(overrides))
}

fn load_templates(
    project_type: ProjectType,
    options: &ProjectOptions,
    args: &GenerateArgs,
    config: &AppConfig,
) -> CliResult<Vec<AssetTemplate>> {
    if !options.sample_code {
        return Ok(Vec::new());
    }
    let explicit = args
        .assets_dir
        .as_deref()
        .or(options.base_assets_directory.as_deref())
        .or(config.assets.base_dir.as_deref());
    let source = resolve_asset_source(explicit)?;
    Ok(project_type.load_templates(source.as_ref(), options)?)
}

#[derive(Debug, Serialize)]
struct PlanEntry {
    kind: LocationKind,
    dir: String,
    decision: MaterializationDecision,
}

#[derive(Debug, Serialize)]
struct DryRun {
    output_root: PathBuf,
    project_type: ProjectType,
    managed: Vec<String>,
    plan: Vec<PlanEntry>,
    /// Every path a pass into an empty directory would produce.
    snapshot: Vec<String>,
}

fn dry_run(
    service: &GenerationService,
    ctx: &mut GenerationContext,
    templates: &[AssetTemplate],
    output: &OutputManager,
) -> CliResult<()> {
    service.declare(ctx)?;

    let plan = if ctx.options.sample_code {
        service
            .plan(ctx, templates)?
            .into_iter()
            .map(|(location, decision)| PlanEntry {
                kind: location.kind,
                dir: location.dir.as_str(),
                decision,
            })
            .collect()
    } else {
        Vec::new()
    };
    let snapshot = service.snapshot(ctx, templates)?;

    let summary = DryRun {
        output_root: ctx.root().to_path_buf(),
        project_type: ctx.project_type,
        managed: ctx.declarations().iter().map(|d| d.path.as_str()).collect(),
        plan,
        snapshot: snapshot.paths().map(String::from).collect(),
    };

    if output.is_json() {
        return output.json(&summary);
    }

    output.info(&format!(
        "Dry run: nothing written to {}",
        summary.output_root.display()
    ))?;
    output.header("Managed files (rewritten every run):")?;
    for path in &summary.managed {
        output.print(&format!("  {path}"))?;
    }
    if summary.plan.is_empty() {
        output.print("Sample code disabled, no scaffold locations")?;
    } else {
        output.header("Scaffold locations:")?;
        for entry in &summary.plan {
            output.print(&format!("  {:<24} {}", format!("{}/", entry.dir), entry.decision))?;
        }
    }
    Ok(())
}

fn print_report(report: &GenerationReport, verbose: bool, output: &OutputManager) -> CliResult<()> {
    output.success(&format!("{} managed file(s) written", report.managed.len()))?;
    if verbose {
        for path in &report.managed {
            output.print(&format!("  {path}"))?;
        }
    }

    match &report.scaffold {
        None => output.info("Sample code disabled, scaffold skipped")?,
        Some(scaffold) => {
            for outcome in &scaffold.outcomes {
                let line = format!("{:<24} {}", format!("{}/", outcome.dir), outcome.decision);
                if outcome.decision.is_write() {
                    output.success(&line)?;
                } else {
                    output.print(&format!("  {line}"))?;
                }
                for path in &outcome.written {
                    output.print(&format!("    + {path}"))?;
                }
            }
            if scaffold.files_retired() > 0 {
                output.warning(&format!(
                    "{} legacy default file(s) removed",
                    scaffold.files_retired()
                ))?;
            }
        }
    }

    output.success(&format!(
        "Done: {} file(s) written to {}",
        report.files_written(),
        report.output_root.display()
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_absolute_without_dot_segments() {
        let root = resolve_root(Path::new("./out/./my-construct")).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("out/my-construct"));
        assert!(!root.components().any(|c| matches!(c, Component::CurDir)));
    }

    #[test]
    fn current_dir_root_keeps_its_name() {
        let root = resolve_root(Path::new(".")).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap());
    }

    #[test]
    fn name_defaults_to_directory_name() {
        let options =
            resolve_options(Path::new("/work/my-construct"), &AppConfig::default(), &[]).unwrap();
        assert_eq!(options.name, "my-construct");
    }

    #[test]
    fn set_beats_config_and_directory_name() {
        let mut config = AppConfig::default();
        config.project.name = Some("from-config".into());
        config.project.author = Some("Config Author".into());

        let options = resolve_options(
            Path::new("/work/dir-name"),
            &config,
            &["name=from-cli".into()],
        )
        .unwrap();

        assert_eq!(options.name, "from-cli");
        assert_eq!(options.author, "Config Author");
    }

    #[test]
    fn config_name_beats_directory_name() {
        let mut config = AppConfig::default();
        config.project.name = Some("from-config".into());
        let options = resolve_options(Path::new("/work/dir-name"), &config, &[]).unwrap();
        assert_eq!(options.name, "from-config");
    }

    #[test]
    fn bad_assignment_is_user_error() {
        let err = resolve_options(Path::new("/w/x"), &AppConfig::default(), &["colour=blue".into()])
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn project_type_falls_back_to_config_default() {
        assert_eq!(
            resolve_project_type(None, &AppConfig::default()).unwrap(),
            ProjectType::CdkConstruct
        );
        let err = resolve_project_type(Some("django"), &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
