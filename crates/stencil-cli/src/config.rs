//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the resulting
//! `ProjectOverrides`.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `STENCIL__<SECTION>__<KEY>`
//! 3. `.stencil.toml` in the current directory
//! 4. The `--config` file, or the user config file
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use stencil_core::domain::ProjectOverrides;

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".stencil.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `generate`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Scaffold asset settings.
    pub assets: AssetsConfig,
    /// Project option overrides applied on every `generate`.
    pub project: ProjectOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub project_type: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            project_type: "cdk-construct".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding `<project-type>/<asset>` files.
    pub base_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, files and environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. Without
    /// it the user config file is read when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(
            config_file.map(PathBuf::as_path),
            &Self::config_path(),
            Path::new(LOCAL_CONFIG_FILE),
        )
    }

    fn load_from(explicit: Option<&Path>, user: &Path, local: &Path) -> anyhow::Result<Self> {
        let defaults = toml::to_string(&AppConfig::default())
            .context("Failed to serialise default configuration")?;

        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml));

        builder = match explicit {
            Some(path) => builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(File::from(user).format(FileFormat::Toml).required(false)),
        };

        let config = builder
            .add_source(File::from(local).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("STENCIL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Config value at a dotted key, `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            value = value.as_object_mut()?.remove(part)?;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn missing(temp: &TempDir, name: &str) -> PathBuf {
        temp.path().join(name)
    }

    #[test]
    fn default_project_type_is_cdk_construct() {
        assert_eq!(AppConfig::default().defaults.project_type, "cdk-construct");
    }

    #[test]
    fn load_without_files_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(
            None,
            &missing(&temp, "user.toml"),
            &missing(&temp, "local.toml"),
        )
        .unwrap();
        assert_eq!(cfg.output.format, "human");
        assert!(cfg.project.name.is_none());
    }

    #[test]
    fn explicit_file_feeds_project_and_assets() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("stencil.toml");
        std::fs::write(
            &file,
            "[project]\nauthor = \"Jane\"\nsample_code = false\n\n[assets]\nbase_dir = \"/srv/assets\"\n",
        )
        .unwrap();

        let cfg =
            AppConfig::load_from(Some(&file), &missing(&temp, "u"), &missing(&temp, "l")).unwrap();

        assert_eq!(cfg.project.author.as_deref(), Some("Jane"));
        assert_eq!(cfg.project.sample_code, Some(false));
        assert_eq!(cfg.assets.base_dir, Some(PathBuf::from("/srv/assets")));
    }

    #[test]
    fn local_file_overrides_user_file() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.toml");
        let local = temp.path().join("local.toml");
        std::fs::write(&user, "[project]\nlicense = \"MIT\"\nauthor = \"User\"\n").unwrap();
        std::fs::write(&local, "[project]\nauthor = \"Local\"\n").unwrap();

        let cfg = AppConfig::load_from(None, &user, &local).unwrap();

        assert_eq!(cfg.project.author.as_deref(), Some("Local"));
        assert_eq!(cfg.project.license.as_deref(), Some("MIT"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let res = AppConfig::load_from(
            Some(&missing(&temp, "nope.toml")),
            &missing(&temp, "u"),
            &missing(&temp, "l"),
        );
        assert!(res.is_err());
    }

    #[test]
    fn unknown_project_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bad.toml");
        std::fs::write(&file, "[project]\ncolour = \"blue\"\n").unwrap();

        let res = AppConfig::load_from(Some(&file), &missing(&temp, "u"), &missing(&temp, "l"));
        assert!(res.is_err());
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("defaults.project_type"),
            Some(serde_json::Value::from("cdk-construct"))
        );
        assert_eq!(cfg.get("project.name"), Some(serde_json::Value::Null));
        assert!(cfg.get("does.not.exist").is_none());
    }
}
