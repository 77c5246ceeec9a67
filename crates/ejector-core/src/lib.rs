//! Ejector Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Ejector, the
//! one-time "eject" that copies a scaffolding package's hidden build
//! configuration into a project and drops the dependency on it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           ejector-cli (CLI)             │
//! │   (prompt, output, config, exit codes)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (EjectService, Materializer)        │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, WorkingTree, CommandRunner)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    ejector-adapters (Infrastructure)    │
//! │ (LocalFilesystem, GitWorkingTree, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (AnnotationRules, EjectionPlan,         │
//! │  Manifest, FootprintDescriptor)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ejector_core::application::{EjectRequest, EjectService, NoopObserver};
//!
//! // Adapters come from ejector-adapters (or test doubles).
//! let service = EjectService::new(filesystem, working_tree, confirmation, runner);
//! let request = EjectRequest::new("/app", "/app/node_modules/react-scripts");
//! let outcome = service.eject(&request, &NoopObserver).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EjectOutcome, EjectRequest, EjectService,
        ports::{CommandRunner, Confirmation, EjectObserver, Filesystem, InstallStatus, WorkingTree},
        services::EjectSummary,
    };
    pub use crate::domain::{
        AnnotationRules, DependencyKind, EjectPhase, EjectionPlan, InstallCommand, InstallTools,
        Manifest, ManifestKey, RelativePath, TemplateEntry, TemplateLayout,
    };
    pub use crate::error::{EjectError, EjectResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
