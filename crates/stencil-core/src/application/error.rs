//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a generation pass.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A scaffold asset could not be read. Aborts the pass.
    #[error("Scaffold asset missing at {path}: {reason}")]
    AssetMissing { path: PathBuf, reason: String },

    /// The configured asset directory is unusable.
    #[error("Asset directory {path} is not usable: {reason}")]
    InvalidAssetDirectory { path: PathBuf, reason: String },

    /// The output root exists but is not a directory.
    #[error("Output path {path} exists and is not a directory")]
    OutputNotDirectory { path: PathBuf },

    /// In-memory state was poisoned by a panicking writer.
    #[error("Filesystem state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::AssetMissing { path, .. } => vec![
                format!("Expected asset file: {}", path.display()),
                "Point --assets-dir (or STENCIL_ASSETS_DIR) at a directory holding <project-type>/<file>".into(),
                "Omit both to use the built-in assets".into(),
            ],
            Self::InvalidAssetDirectory { path, .. } => vec![
                format!("Check that {} exists and is a directory", path.display()),
                "Unset STENCIL_ASSETS_DIR to fall back to the built-in assets".into(),
            ],
            Self::OutputNotDirectory { path } => vec![
                format!("Remove or rename {}", path.display()),
                "Or choose a different output directory".into(),
            ],
            Self::LockPoisoned => vec!["Retry the command".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AssetMissing { .. } => ErrorCategory::NotFound,
            Self::InvalidAssetDirectory { .. } => ErrorCategory::Configuration,
            Self::OutputNotDirectory { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
