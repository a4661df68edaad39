//! Driven (output) ports, implemented by infrastructure.

use std::path::{Path, PathBuf};

use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (tests)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Every regular file below `dir`, at any depth. A missing `dir` yields
    /// an empty list.
    fn files_under(&self, dir: &Path) -> StencilResult<Vec<PathBuf>>;

    fn remove_file(&self, path: &Path) -> StencilResult<()>;
}

/// Port for scaffold asset text.
///
/// Implemented by:
/// - `stencil_adapters::assets::EmbeddedAssets` (compiled into the binary)
/// - `stencil_adapters::assets::DirectoryAssets` (a directory on disk)
#[cfg_attr(test, mockall::automock)]
pub trait AssetSource: Send + Sync {
    /// Read `<project_dir>/<file>`. A missing asset is an
    /// `ApplicationError::AssetMissing`.
    fn read(&self, project_dir: &str, file: &str) -> StencilResult<String>;

    /// Where the assets come from, for logs.
    fn describe(&self) -> String;
}
