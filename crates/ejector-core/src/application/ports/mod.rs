//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `ejector-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `WorkingTree`: Version-control status
//!   - `Confirmation`: The yes/no decision to proceed
//!   - `CommandRunner`: External installer invocation
//!   - `EjectObserver`: Progress feedback (optional side channel)

pub mod output;

pub use output::{
    CommandRunner, Confirmation, EjectObserver, Filesystem, InstallStatus, NoopObserver,
    WorkingTree,
};

#[cfg(test)]
pub use output::{MockCommandRunner, MockConfirmation, MockFilesystem, MockWorkingTree};
