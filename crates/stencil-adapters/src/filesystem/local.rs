//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn files_under(&self, dir: &Path) -> StencilResult<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: e.path().unwrap_or(dir).to_path_buf(),
                reason: format!("Failed to walk directory: {e}"),
            })?;
            // Linked directories are not walked. Every other link counts, dangling or not.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && !entry.path().is_dir());
            if is_file {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn files_under_walks_nested_directories() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let nested = temp.path().join("src/crd-example");
        fs.create_dir_all(&nested).unwrap();
        fs.write_file(&temp.path().join("src/index.ts"), "").unwrap();
        fs.write_file(&nested.join("crd-example.ts"), "").unwrap();

        let mut files = fs.files_under(&temp.path().join("src")).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![temp.path().join("src/crd-example/crd-example.ts"), temp.path().join("src/index.ts")]
        );
    }

    #[test]
    fn files_under_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let files = LocalFilesystem::new()
            .files_under(&temp.path().join("nope"))
            .unwrap();
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn files_under_counts_symlinked_files() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&temp.path().join("src")).unwrap();
        fs.write_file(&temp.path().join("shared-index.ts"), "export const userWork = 42;\n")
            .unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("shared-index.ts"),
            temp.path().join("src/index.ts"),
        )
        .unwrap();

        let files = fs.files_under(&temp.path().join("src")).unwrap();

        assert_eq!(files, vec![temp.path().join("src/index.ts")]);
    }

    #[cfg(unix)]
    #[test]
    fn files_under_counts_dangling_links_but_not_linked_dirs() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&temp.path().join("src")).unwrap();
        fs.create_dir_all(&temp.path().join("elsewhere")).unwrap();
        fs.write_file(&temp.path().join("elsewhere/lib.ts"), "").unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.ts"), temp.path().join("src/index.ts"))
            .unwrap();
        std::os::unix::fs::symlink(temp.path().join("elsewhere"), temp.path().join("src/linked"))
            .unwrap();

        let files = fs.files_under(&temp.path().join("src")).unwrap();

        assert_eq!(files, vec![temp.path().join("src/index.ts")]);
    }

    // APFS rejects non-UTF-8 names.
    #[cfg(target_os = "linux")]
    #[test]
    fn files_under_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let src = temp.path().join("src");
        fs.create_dir_all(&src).unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.ts");
        std::fs::write(src.join(name), "export {};\n").unwrap();

        let files = fs.files_under(&src).unwrap();

        assert_eq!(files, vec![src.join(name)]);
    }

    #[test]
    fn write_into_missing_parent_fails() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&temp.path().join("missing/file.ts"), "x")
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
