//! Managed file declarations and the context they are collected in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    DomainError, ProjectOptions, ProjectType, asset::AssetTemplate, common::RelativePath,
};

/// Banner prepended to generated text files so users know not to edit them.
pub const MANAGED_MARKER: &str = "~~ Generated by stencil. To modify, edit your stencil config and re-run.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Json,
    Yaml,
}

/// A managed file with its exact content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDeclaration {
    pub path: RelativePath,
    pub kind: FileKind,
    pub content: String,
}

impl FileDeclaration {
    /// Text file from lines, terminated by a newline.
    pub fn lines<I, S>(path: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut content = lines
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        content.push('\n');
        Self {
            path: RelativePath::new(path),
            kind: FileKind::Text,
            content,
        }
    }

    pub fn json<T: Serialize>(path: &str, value: &T) -> Result<Self, DomainError> {
        let mut content =
            serde_json::to_string_pretty(value).map_err(|e| DomainError::Serialization {
                path: path.into(),
                reason: e.to_string(),
            })?;
        content.push('\n');
        Ok(Self {
            path: RelativePath::new(path),
            kind: FileKind::Json,
            content,
        })
    }

    pub fn yaml<T: Serialize>(path: &str, value: &T) -> Result<Self, DomainError> {
        let body = serde_yaml_ng::to_string(value).map_err(|e| DomainError::Serialization {
            path: path.into(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: RelativePath::new(path),
            kind: FileKind::Yaml,
            content: format!("# {MANAGED_MARKER}\n\n{body}"),
        })
    }
}

/// Everything one generation pass needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub output_root: PathBuf,
    pub project_type: ProjectType,
    pub options: ProjectOptions,
    declarations: Vec<FileDeclaration>,
}

impl GenerationContext {
    pub fn new(
        output_root: impl Into<PathBuf>,
        project_type: ProjectType,
        options: ProjectOptions,
    ) -> Self {
        Self {
            output_root: output_root.into(),
            project_type,
            options,
            declarations: Vec::new(),
        }
    }

    /// Register a managed file. A later declaration for the same path
    /// replaces the earlier one.
    pub fn declare(&mut self, declaration: FileDeclaration) {
        if let Some(existing) = self
            .declarations
            .iter_mut()
            .find(|d| d.path == declaration.path)
        {
            *existing = declaration;
        } else {
            self.declarations.push(declaration);
        }
    }

    pub fn declarations(&self) -> &[FileDeclaration] {
        &self.declarations
    }

    pub fn find(&self, path: &str) -> Option<&FileDeclaration> {
        self.declarations.iter().find(|d| d.path.as_str() == path)
    }

    pub fn root(&self) -> &Path {
        &self.output_root
    }
}

/// In-memory view of a generated tree, keyed by forward-slash path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    files: BTreeMap<String, String>,
}

impl Snapshot {
    pub fn from_context(ctx: &GenerationContext) -> Self {
        let mut snap = Self::default();
        for d in ctx.declarations() {
            snap.files.insert(d.path.as_str(), d.content.clone());
        }
        snap
    }

    pub fn add_templates(&mut self, templates: &[AssetTemplate]) {
        for t in templates {
            self.files
                .entry(t.target().as_str())
                .or_insert_with(|| t.content().to_string());
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Parse a JSON file from the snapshot.
    pub fn json(&self, path: &str) -> Option<serde_json::Value> {
        self.get(path).and_then(|c| serde_json::from_str(c).ok())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GenerationContext {
        GenerationContext::new("/out", ProjectType::CdkConstruct, ProjectOptions::default())
    }

    #[test]
    fn later_declaration_replaces_earlier() {
        let mut c = ctx();
        c.declare(FileDeclaration::lines("README.md", ["first"]));
        c.declare(FileDeclaration::lines(".gitignore", ["tmp"]));
        c.declare(FileDeclaration::lines("README.md", ["second"]));

        assert_eq!(c.declarations().len(), 2);
        assert_eq!(c.find("README.md").unwrap().content, "second\n");
        assert_eq!(c.declarations()[0].path.as_str(), "README.md");
    }

    #[test]
    fn json_declaration_is_pretty_and_newline_terminated() {
        let d = FileDeclaration::json("package.json", &serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(d.kind, FileKind::Json);
        assert!(d.content.ends_with("}\n"));
        assert!(d.content.contains("\"name\": \"x\""));
    }

    #[test]
    fn yaml_declaration_carries_marker() {
        let d = FileDeclaration::yaml("a.yml", &serde_json::json!({"k": "v"})).unwrap();
        assert!(d.content.starts_with("# ~~ Generated by stencil"));
        assert!(d.content.contains("k: v"));
    }

    #[test]
    fn snapshot_prefers_declarations_over_templates() {
        let mut c = ctx();
        c.declare(FileDeclaration::lines("src/index.ts", ["declared"]));
        let mut snap = Snapshot::from_context(&c);
        snap.add_templates(&[
            AssetTemplate::new("index", RelativePath::new("src/index.ts"), "template"),
            AssetTemplate::new("other", RelativePath::new("src/other.ts"), "other"),
        ]);
        assert_eq!(snap.get("src/index.ts"), Some("declared\n"));
        assert_eq!(snap.get("src/other.ts"), Some("other"));
        assert_eq!(snap.len(), 2);
    }
}
