//! Project options and their explicit merge.
//!
//! [`ProjectOptions`] always holds a complete option set. Callers start from
//! [`ProjectOptions::default`] and apply a [`ProjectOverrides`] with
//! [`ProjectOptions::merge`]; every `Some` field replaces the default verbatim.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Keys accepted by [`ProjectOverrides::set`].
pub const OPTION_KEYS: &[&str] = &[
    "name",
    "description",
    "author",
    "author_address",
    "repository_url",
    "default_release_branch",
    "cdk_version",
    "license",
    "copyright_owner",
    "copyright_period",
    "funding_github",
    "sample_code",
    "crd_example",
    "base_assets_directory",
    "extra_gitignore",
];

/// Complete option set for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOptions {
    pub name: String,
    pub description: String,
    pub author: String,
    pub author_address: String,
    pub repository_url: String,
    pub default_release_branch: String,
    pub cdk_version: String,
    pub license: String,
    pub copyright_owner: String,
    pub copyright_period: String,
    /// GitHub sponsor handle written to `FUNDING.yaml`; empty disables the file.
    pub funding_github: String,
    /// Materialize sample sources and tests.
    pub sample_code: bool,
    /// Add the custom-resource example next to the sample sources.
    pub crd_example: bool,
    pub base_assets_directory: Option<PathBuf>,
    pub extra_gitignore: Vec<String>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            author: String::new(),
            author_address: String::new(),
            repository_url: String::new(),
            default_release_branch: "main".into(),
            cdk_version: "2.177.0".into(),
            license: "Apache-2.0".into(),
            copyright_owner: "MV Consulting GmbH".into(),
            copyright_period: "2025".into(),
            funding_github: "mavogel".into(),
            sample_code: true,
            crd_example: false,
            base_assets_directory: None,
            extra_gitignore: Vec::new(),
        }
    }
}

impl ProjectOptions {
    /// Apply every field set in `overrides`.
    pub fn merge(mut self, overrides: ProjectOverrides) -> Self {
        let ProjectOverrides {
            name,
            description,
            author,
            author_address,
            repository_url,
            default_release_branch,
            cdk_version,
            license,
            copyright_owner,
            copyright_period,
            funding_github,
            sample_code,
            crd_example,
            base_assets_directory,
            extra_gitignore,
        } = overrides;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = author {
            self.author = v;
        }
        if let Some(v) = author_address {
            self.author_address = v;
        }
        if let Some(v) = repository_url {
            self.repository_url = v;
        }
        if let Some(v) = default_release_branch {
            self.default_release_branch = v;
        }
        if let Some(v) = cdk_version {
            self.cdk_version = v;
        }
        if let Some(v) = license {
            self.license = v;
        }
        if let Some(v) = copyright_owner {
            self.copyright_owner = v;
        }
        if let Some(v) = copyright_period {
            self.copyright_period = v;
        }
        if let Some(v) = funding_github {
            self.funding_github = v;
        }
        if let Some(v) = sample_code {
            self.sample_code = v;
        }
        if let Some(v) = crd_example {
            self.crd_example = v;
        }
        if let Some(v) = base_assets_directory {
            self.base_assets_directory = Some(v);
        }
        if let Some(v) = extra_gitignore {
            self.extra_gitignore = v;
        }
        self
    }

    /// Fail on options a preset cannot do without.
    pub fn require_name(&self) -> Result<&str, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingRequiredOption { field: "name" });
        }
        Ok(name)
    }
}

/// Partial option set from a config file or `--set key=value` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectOverrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub author_address: Option<String>,
    pub repository_url: Option<String>,
    pub default_release_branch: Option<String>,
    pub cdk_version: Option<String>,
    pub license: Option<String>,
    pub copyright_owner: Option<String>,
    pub copyright_period: Option<String>,
    pub funding_github: Option<String>,
    pub sample_code: Option<bool>,
    pub crd_example: Option<bool>,
    pub base_assets_directory: Option<PathBuf>,
    pub extra_gitignore: Option<Vec<String>>,
}

impl ProjectOverrides {
    /// Parse `key=value` and apply it.
    pub fn assign(&mut self, raw: &str) -> Result<(), DomainError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| DomainError::MalformedAssignment { raw: raw.into() })?;
        self.set(key.trim(), value.trim())
    }

    /// Set one option from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        let text = || Some(value.to_string());
        match key {
            "name" => self.name = text(),
            "description" => self.description = text(),
            "author" => self.author = text(),
            "author_address" => self.author_address = text(),
            "repository_url" => self.repository_url = text(),
            "default_release_branch" => self.default_release_branch = text(),
            "cdk_version" => self.cdk_version = text(),
            "license" => self.license = text(),
            "copyright_owner" => self.copyright_owner = text(),
            "copyright_period" => self.copyright_period = text(),
            "funding_github" => self.funding_github = text(),
            "sample_code" => self.sample_code = Some(parse_bool(key, value)?),
            "crd_example" => self.crd_example = Some(parse_bool(key, value)?),
            "base_assets_directory" => self.base_assets_directory = Some(PathBuf::from(value)),
            "extra_gitignore" => {
                self.extra_gitignore = Some(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                )
            }
            _ => return Err(DomainError::UnknownOption { key: key.into() }),
        }
        Ok(())
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn overlay(self, other: ProjectOverrides) -> Self {
        Self {
            name: other.name.or(self.name),
            description: other.description.or(self.description),
            author: other.author.or(self.author),
            author_address: other.author_address.or(self.author_address),
            repository_url: other.repository_url.or(self.repository_url),
            default_release_branch: other.default_release_branch.or(self.default_release_branch),
            cdk_version: other.cdk_version.or(self.cdk_version),
            license: other.license.or(self.license),
            copyright_owner: other.copyright_owner.or(self.copyright_owner),
            copyright_period: other.copyright_period.or(self.copyright_period),
            funding_github: other.funding_github.or(self.funding_github),
            sample_code: other.sample_code.or(self.sample_code),
            crd_example: other.crd_example.or(self.crd_example),
            base_assets_directory: other.base_assets_directory.or(self.base_assets_directory),
            extra_gitignore: other.extra_gitignore.or(self.extra_gitignore),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(DomainError::InvalidOptionValue {
            key: key.into(),
            value: value.into(),
            reason: "expected a boolean".into(),
        }),
    }
}
