// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Ejector.
//!
//! This module contains the pure rules of an ejection: which regions of a
//! template file survive, which paths get created, how two manifests are
//! merged, and what the scaffolding package leaves behind. All I/O is
//! handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Few external crates**: std + thiserror, regex for markers, serde_json
//!   for manifest documents
//! - **Immutable plans**: an `EjectionPlan` cannot change after it is built
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    annotations::{AnnotationRule, MarkerPair},
    common::RelativePath,
    footprint::FootprintDescriptor,
    manifest::{ConfigBlocks, Manifest, MergeReport},
    plan::{EjectionPlan, PlannedFile, TemplateEntry},
    test_config::{ROOT_DIR_TOKEN, TestRunnerOptions, build_test_runner_config, root_dir_resolver},
    Annotated, AnnotationRules,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    DependencyKind, EjectPhase, InstallCommand, InstallTools, ManifestKey, TemplateLayout,
};

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use super::*;

    // ========================================================================
    // Cross-entity Tests
    // ========================================================================

    #[test]
    fn merged_manifest_never_mentions_scaffolding_package() {
        let template = Manifest::from_value(json!({
            "name": "react-scripts",
            "bin": { "react-scripts": "./bin/react-scripts.js" },
            "dependencies": { "webpack": "1.14.0", "fsevents": "1.0.17" },
            "optionalDependencies": { "fsevents": "1.0.17" }
        }))
        .unwrap();
        let mut target = Manifest::from_value(json!({
            "name": "my-app",
            "devDependencies": { "react-scripts": "0.9.0" },
            "dependencies": { "react": "^15.4.2" }
        }))
        .unwrap();

        let footprint =
            FootprintDescriptor::from_manifest(&template, "/app/node_modules/react-scripts")
                .unwrap();
        let blocks = ConfigBlocks {
            test_runner: build_test_runner_config(
                root_dir_resolver,
                &TestRunnerOptions {
                    ejecting: true,
                    ..Default::default()
                },
            ),
            transpiler: json!({ "presets": ["react-app"] }),
            lint: json!({ "extends": "react-app" }),
        };

        target
            .merge_template(&template, &footprint.package_name, blocks)
            .unwrap();

        for kind in [DependencyKind::Runtime, DependencyKind::Dev] {
            if let Some(map) = target.dependencies(kind).unwrap() {
                assert!(!map.contains_key("react-scripts"), "{kind} still lists it");
            }
        }
        let deps = target.dependencies(DependencyKind::Runtime).unwrap().unwrap();
        assert!(deps.contains_key("webpack"));
        assert!(!deps.contains_key("fsevents"));
        assert!(footprint.is_owned_by(Path::new("/app")));
    }

    #[test]
    fn default_rules_and_layout_plan_together() {
        let layout = TemplateLayout::default();
        let entries: Vec<TemplateEntry> = layout
            .folders
            .iter()
            .map(|f| TemplateEntry::directory(RelativePath::try_new(f).unwrap()))
            .collect();
        let plan = EjectionPlan::build(Path::new("/app"), &entries, |_| false).unwrap();
        assert_eq!(plan.directories().len(), 3);

        let rules = AnnotationRules::eject_defaults().unwrap();
        assert_eq!(rules.apply("x"), Annotated::Keep("x\n".into()));
    }
}
