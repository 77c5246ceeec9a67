//! Infrastructure adapters for Ejector.
//!
//! This crate implements the ports defined in `ejector-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::ProcessRunner;
pub use vcs::GitWorkingTree;
