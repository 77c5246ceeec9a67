// ============================================================================
// domain/error.rs - EJECTION DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through the observer and CLI unchanged)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Preflight Errors (nothing has been written yet)
    // ========================================================================
    #[error("{} planned path(s) already exist in the project: {}", paths.len(), display_paths(paths))]
    DestinationConflict { paths: Vec<PathBuf> },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid marker rule '{pattern}': {reason}")]
    InvalidMarkerRule { pattern: String, reason: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DestinationConflict { paths } => {
                let mut out = vec![
                    "Ejecting would overwrite these files or directories:".into(),
                ];
                out.extend(paths.iter().map(|p| format!("  • {}", p.display())));
                out.push(
                    "Move or delete them (maybe make a copy for backup) and run this command again"
                        .into(),
                );
                out
            }
            Self::InvalidManifest { reason } => vec![
                format!("Manifest problem: {}", reason),
                "Make sure package.json is valid JSON with an object at the top level".into(),
            ],
            Self::InvalidMarkerRule { pattern, .. } => vec![
                format!("Marker rule '{}' could not be compiled", pattern),
                "This is a bug in the built-in annotation rules".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DestinationConflict { .. } => ErrorCategory::Preflight,
            Self::InvalidManifest { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidMarkerRule { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Preflight,
    Validation,
    Internal,
}
