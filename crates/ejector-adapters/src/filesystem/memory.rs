//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use ejector_core::{
    application::{ApplicationError, ports::Filesystem},
    error::EjectResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand one clone to the service
/// and inspect the other afterwards.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Writes below these prefixes fail.
    read_only: Vec<PathBuf>,
    /// Removals fail everywhere.
    removals_fail: bool,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_dir_chain(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_owned());
        }
        self
    }

    /// Seed a directory and its ancestors.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_dir_chain(&mut inner.directories, path.as_ref());
        }
        self
    }

    /// Make every write at or below `prefix` fail.
    pub fn with_read_only(self, prefix: impl Into<PathBuf>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.push(prefix.into());
        }
        self
    }

    /// Make every removal fail.
    pub fn with_failing_removals(self) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.removals_fail = true;
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files.
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Full snapshot of files and directories, for before/after comparisons.
    pub fn snapshot(&self) -> (BTreeMap<PathBuf, String>, BTreeSet<PathBuf>) {
        self.inner
            .read()
            .map(|inner| (inner.files.clone(), inner.directories.clone()))
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_dir_chain(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn lock_error() -> ejector_core::error::EjectError {
    ApplicationError::AdapterFailure {
        name: "memory-filesystem",
        reason: "lock poisoned".into(),
    }
    .into()
}

fn fs_error(path: &Path, reason: &str) -> ejector_core::error::EjectError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> EjectResult<String> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> EjectResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        if inner.read_only.iter().any(|p| path.starts_with(p)) {
            return Err(fs_error(path, "Read-only location"));
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> EjectResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        if inner.read_only.iter().any(|p| path.starts_with(p)) {
            return Err(fs_error(path, "Read-only location"));
        }
        insert_dir_chain(&mut inner.directories, path);
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> EjectResult<Vec<PathBuf>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        if !inner.directories.contains(dir) {
            return Err(fs_error(dir, "No such directory"));
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name().map(PathBuf::from))
            .collect())
    }

    fn remove_file(&self, path: &Path) -> EjectResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        if inner.removals_fail {
            return Err(fs_error(path, "Permission denied"));
        }
        inner.files.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> EjectResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        if inner.removals_fail {
            return Err(fs_error(path, "Permission denied"));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
