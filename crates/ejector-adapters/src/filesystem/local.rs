//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use ejector_core::{application::ports::Filesystem, error::EjectResult};

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
    fn exists(&self, path: &Path) -> bool {
        // A dangling link still occupies the name.
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> EjectResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> EjectResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> EjectResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn list_files(&self, dir: &Path) -> EjectResult<Vec<PathBuf>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                let err = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop"));
                map_io_error(&path, err, "list directory")
            })?;
            // WalkDir does not follow links, so links report as links here.
            if entry.file_type().is_file() {
                names.push(PathBuf::from(entry.file_name()));
            }
        }
        Ok(names)
    }

    fn remove_file(&self, path: &Path) -> EjectResult<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                Err(map_io_error(path, e, "remove file"))
            }
            _ => Ok(()),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> EjectResult<()> {
        match std::fs::remove_dir_all(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                Err(map_io_error(path, e, "remove directory"))
            }
            _ => Ok(()),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ejector_core::error::EjectError {
    use ejector_core::application::ApplicationError;

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
    fn list_files_skips_directories_and_sorts() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.js"), "b").unwrap();
        std::fs::write(tmp.path().join("a.js"), "a").unwrap();
        std::fs::create_dir(tmp.path().join("jest")).unwrap();

        let names = LocalFilesystem::new().list_files(tmp.path()).unwrap();
        assert_eq!(names, vec![PathBuf::from("a.js"), PathBuf::from("b.js")]);
    }

    #[cfg(unix)]
    #[test]
    fn list_files_skips_symlinks() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("real.js"), "x").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real.js"), tmp.path().join("link.js")).unwrap();

        let names = LocalFilesystem::new().list_files(tmp.path()).unwrap();
        assert_eq!(names, vec![PathBuf::from("real.js")]);
    }

    #[test]
    fn list_files_on_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(LocalFilesystem::new().list_files(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn removing_missing_paths_is_fine() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.remove_file(&tmp.path().join("ghost")).is_ok());
        assert!(fs.remove_dir_all(&tmp.path().join("ghost-dir")).is_ok());
    }

    #[test]
    fn write_then_read_back() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("out.txt");
        fs.write_file(&path, "hello\n").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "hello\n");
    }
}
