//! Implementation of the `stencil list` command.

use serde::Serialize;

use stencil_core::domain::ProjectType;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ProjectTypeEntry {
    id: &'static str,
    description: &'static str,
    /// Scaffold files written into an empty directory.
    targets: Vec<&'static str>,
}

impl From<ProjectType> for ProjectTypeEntry {
    fn from(project_type: ProjectType) -> Self {
        Self {
            id: project_type.id(),
            description: project_type.description(),
            targets: project_type
                .asset_manifest()
                .iter()
                .map(|spec| spec.target)
                .collect(),
        }
    }
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let entries: Vec<ProjectTypeEntry> = ProjectType::ALL.iter().copied().map(Into::into).collect();

    match args.format {
        ListFormat::Table => {
            output.header("Available project types:")?;
            for entry in &entries {
                output.print(&format!("  {:<16} {}", entry.id, entry.description))?;
            }
        }
        ListFormat::List => {
            for entry in &entries {
                output.print(entry.id)?;
            }
        }
        // Bypasses quiet mode so the JSON stays parseable.
        ListFormat::Json => output.json(&entries)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_lists_default_targets() {
        let entry = ProjectTypeEntry::from(ProjectType::CdkConstruct);
        assert_eq!(entry.id, "cdk-construct");
        assert!(entry.targets.contains(&"src/index.ts"));
        assert!(!entry.targets.iter().any(|t| t.contains("crd-example")));
    }
}
