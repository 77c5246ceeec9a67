//! Unified error handling for Ejector Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Ejector Core operations.
///
/// This enum wraps all possible errors that can occur when using ejector-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum EjectError {
    /// Errors from the domain layer (conflicts, invalid documents).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl EjectError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Preflight => ErrorCategory::Preflight,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Raised before anything was written: the project is untouched.
    pub fn is_preflight(&self) -> bool {
        self.category() == ErrorCategory::Preflight
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Dirty working tree or destination conflict; nothing was mutated.
    Preflight,
    Validation,
    Internal,
}

/// Convenient result type alias.
pub type EjectResult<T> = Result<T, EjectError>;
