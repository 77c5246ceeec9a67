//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The working tree has uncommitted or untracked changes.
    #[error("This git repository has untracked files or uncommitted changes:\n\n{}", indent(paths))]
    DirtyWorkingTree { paths: Vec<String> },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A manifest could not be read or parsed.
    #[error("Could not read manifest {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    /// A port implementation misbehaved (lock poisoned, etc.).
    #[error("Adapter '{name}' failed: {reason}")]
    AdapterFailure { name: &'static str, reason: String },
}

fn indent(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirtyWorkingTree { .. } => vec![
                "Remove untracked files, stash or commit any changes, and try again".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "The project may be partially ejected; revert it with git before retrying".into(),
            ],
            Self::ManifestParse { path, .. } => vec![
                format!("Check that {} exists and is valid JSON", path.display()),
            ],
            Self::AdapterFailure { .. } => vec!["This is likely a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirtyWorkingTree { .. } => ErrorCategory::Preflight,
            Self::ManifestParse { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::AdapterFailure { .. } => ErrorCategory::Internal,
        }
    }
}
