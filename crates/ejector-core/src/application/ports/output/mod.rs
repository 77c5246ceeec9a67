//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ejector-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{DependencyKind, EjectPhase, InstallCommand, ManifestKey, RelativePath};
use crate::error::EjectResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ejector_adapters::filesystem::LocalFilesystem` (production)
/// - `ejector_adapters::filesystem::MemoryFilesystem` (testing)
///
/// All paths handed to the port are absolute; the service resolves
/// template-relative paths before calling in.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> EjectResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> EjectResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> EjectResult<()>;

    /// Names of the regular files directly inside `dir`, sorted.
    ///
    /// Subdirectories and symlinks are not listed.
    fn list_files(&self, dir: &Path) -> EjectResult<Vec<PathBuf>>;

    /// Remove a single file or link.
    fn remove_file(&self, path: &Path) -> EjectResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> EjectResult<()>;
}

/// Port for version-control status.
#[cfg_attr(test, mockall::automock)]
pub trait WorkingTree: Send + Sync {
    /// One line per pending change; empty means clean.
    ///
    /// Implementations report a missing or failing VCS as clean.
    fn pending_changes(&self, root: &Path) -> Vec<String>;
}

/// Port for the go/no-go decision.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmation: Send + Sync {
    fn confirm(&self, question: &str) -> EjectResult<bool>;
}

/// How an external command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Succeeded,
    Failed { code: Option<i32> },
    NotStarted { reason: String },
}

impl InstallStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Port for running the dependency installer.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with inherited stdio and wait for it.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> InstallStatus;
}

/// Progress notifications. Every method defaults to doing nothing.
pub trait EjectObserver {
    fn phase(&self, _phase: EjectPhase) {}

    fn copying_into(&self, _project_root: &Path) {}

    fn file_added(&self, _path: &RelativePath) {}

    fn file_skipped(&self, _path: &RelativePath) {}

    fn dependency_removed(&self, _name: &str, _kind: DependencyKind) {}

    fn dependency_added(&self, _name: &str, _version: &str) {}

    fn config_injected(&self, _key: ManifestKey) {}

    fn install_started(&self, _command: &InstallCommand) {}

    fn install_finished(&self, _command: &InstallCommand, _status: &InstallStatus) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EjectObserver for NoopObserver {}
