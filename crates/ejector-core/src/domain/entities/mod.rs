pub mod annotations;
pub mod common;
pub mod footprint;
pub mod manifest;
pub mod plan;
pub mod test_config;

pub use crate::domain::DomainError;
pub use annotations::{Annotated, AnnotationRules};
pub use footprint::FootprintDescriptor;
pub use manifest::{ConfigBlocks, Manifest, MergeReport};
pub use plan::{EjectionPlan, PlannedFile, TemplateEntry};
