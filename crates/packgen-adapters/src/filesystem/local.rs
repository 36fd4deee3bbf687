//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use packgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PackgenError, PackgenResult},
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
    fn create_dir_all(&self, path: &Path) -> PackgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PackgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> PackgenResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PackgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_removes_nested_directories() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let module = temp.path().join("Modules/Screens/Catalog");

        fs.create_dir_all(&module.join("Sources/Catalog")).unwrap();
        fs.write_file(&module.join("Package.swift"), "// swift-tools-version: 6.0\n")
            .unwrap();
        assert!(fs.exists(&module.join("Package.swift")));

        fs.remove_dir_all(&module).unwrap();
        assert!(!fs.exists(&module));
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&temp.path().join("missing/Package.swift"), "")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to write file"));
    }
}
