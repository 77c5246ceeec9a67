//! Application layer for Ejector.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (EjectService) and the file
//!   materializer it drives
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    EjectOutcome, EjectRequest, EjectService, EntrySource, FolderScan, Materializer,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandRunner, Confirmation, EjectObserver, Filesystem, InstallStatus, NoopObserver,
    WorkingTree,
};

pub use error::ApplicationError;
