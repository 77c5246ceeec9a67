//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! the "eject a project" use case.

pub mod eject_service;
pub mod materializer;

pub use eject_service::{CONFIRM_QUESTION, EjectOutcome, EjectRequest, EjectService, EjectSummary};
pub use materializer::{EntrySource, FolderScan, MaterializeReport, Materializer};
