//! Assets read from a directory on disk.

use std::path::PathBuf;

use tracing::debug;

use stencil_core::{
    application::{ApplicationError, ports::AssetSource},
    error::StencilResult,
};

/// Reads `<base>/<project_dir>/<file>` as text.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    base: PathBuf,
}

impl DirectoryAssets {
    /// Fails unless `base` is an existing directory.
    pub fn new(base: impl Into<PathBuf>) -> StencilResult<Self> {
        let base = base.into();
        if !base.is_dir() {
            return Err(ApplicationError::InvalidAssetDirectory {
                path: base,
                reason: "not a directory".into(),
            }
            .into());
        }
        Ok(Self { base })
    }
}

impl AssetSource for DirectoryAssets {
    fn read(&self, project_dir: &str, file: &str) -> StencilResult<String> {
        let path = self.base.join(project_dir).join(file);
        debug!(path = %path.display(), "Reading asset");
        std::fs::read_to_string(&path).map_err(|e| {
            ApplicationError::AssetMissing {
                path,
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn describe(&self) -> String {
        self.base.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::error::StencilError;
    use tempfile::TempDir;

    #[test]
    fn reads_project_scoped_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("cdk-construct")).unwrap();
        std::fs::write(temp.path().join("cdk-construct/src_index.ts"), "custom\n").unwrap();

        let assets = DirectoryAssets::new(temp.path()).unwrap();
        assert_eq!(assets.read("cdk-construct", "src_index.ts").unwrap(), "custom\n");
    }

    #[test]
    fn missing_file_is_asset_missing() {
        let temp = TempDir::new().unwrap();
        let assets = DirectoryAssets::new(temp.path()).unwrap();

        let err = assets.read("cdk-construct", "src_index.ts").unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::AssetMissing { ref path, .. })
                if path.ends_with("cdk-construct/src_index.ts")
        ));
    }
}
