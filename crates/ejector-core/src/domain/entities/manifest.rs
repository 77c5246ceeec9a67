use serde_json::{Map, Value};

use crate::domain::{
    error::DomainError,
    value_objects::{DependencyKind, ManifestKey},
};

/// A package manifest document.
///
/// Only the dependency maps and the injected configuration keys are
/// interpreted; every other field is carried through untouched and in its
/// original order.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Map<String, Value>,
}

/// Configuration documents injected into the target manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBlocks {
    pub test_runner: Value,
    pub transpiler: Value,
    pub lint: Value,
}

/// What a merge changed, in the order it happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub removed: Vec<(DependencyKind, String)>,
    pub copied: Vec<(String, String)>,
    pub injected: Vec<ManifestKey>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest {
                reason: e.to_string(),
            })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => Err(DomainError::InvalidManifest {
                reason: format!("expected a JSON object, found {}", type_name(&other)),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.doc.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// The dependency map of the given kind. Absent maps read as `None`.
    pub fn dependencies(&self, kind: DependencyKind) -> Result<Option<&Map<String, Value>>, DomainError> {
        match self.doc.get(kind.key()) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(DomainError::InvalidManifest {
                reason: format!("'{}' must be an object, found {}", kind.key(), type_name(other)),
            }),
        }
    }

    fn dependencies_mut(&mut self, kind: DependencyKind) -> Result<&mut Map<String, Value>, DomainError> {
        let slot = self
            .doc
            .entry(kind.key())
            .or_insert_with(|| Value::Object(Map::new()));
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::InvalidManifest {
                reason: format!("'{}' must be an object, found {}", kind.key(), type_name(other)),
            }),
        }
    }

    /// Remove `name` from one dependency map. Absent names and absent maps
    /// are not errors.
    pub fn remove_dependency(&mut self, kind: DependencyKind, name: &str) -> Result<Option<Value>, DomainError> {
        if self.dependencies(kind)?.is_none() {
            return Ok(None);
        }
        Ok(self.dependencies_mut(kind)?.shift_remove(name))
    }

    pub fn set_dependency(&mut self, kind: DependencyKind, name: &str, version: Value) -> Result<(), DomainError> {
        self.dependencies_mut(kind)?.insert(name.to_owned(), version);
        Ok(())
    }

    pub fn insert(&mut self, key: ManifestKey, value: Value) {
        self.doc.insert(key.as_str().to_owned(), value);
    }

    /// Merge the template manifest into this (target) manifest.
    ///
    /// 1. `package_name` is removed from `devDependencies` and
    ///    `dependencies`.
    /// 2. Every template dependency that is not also optional is copied into
    ///    `dependencies`, replacing any existing version.
    /// 3. The three configuration blocks are injected.
    ///
    /// Nothing else in the target is touched.
    pub fn merge_template(
        &mut self,
        template: &Manifest,
        package_name: &str,
        blocks: ConfigBlocks,
    ) -> Result<MergeReport, DomainError> {
        let mut report = MergeReport::default();

        for kind in [DependencyKind::Dev, DependencyKind::Runtime] {
            if self.remove_dependency(kind, package_name)?.is_some() {
                report.removed.push((kind, package_name.to_owned()));
            }
        }

        let optional = template.dependencies(DependencyKind::Optional)?;
        if let Some(deps) = template.dependencies(DependencyKind::Runtime)? {
            for (name, version) in deps {
                let is_optional = optional.is_some_and(|o| o.contains_key(name));
                if is_optional || name == package_name {
                    continue;
                }
                self.set_dependency(DependencyKind::Runtime, name, version.clone())?;
                report.copied.push((name.clone(), version_spec(version)));
            }
        }

        for (key, value) in [
            (ManifestKey::TestRunner, blocks.test_runner),
            (ManifestKey::Transpiler, blocks.transpiler),
            (ManifestKey::Lint, blocks.lint),
        ] {
            self.insert(key, value);
            report.injected.push(key);
        }

        Ok(report)
    }

    /// Two-space indented JSON followed by a newline.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut out =
            serde_json::to_string_pretty(&self.doc).map_err(|e| DomainError::InvalidManifest {
                reason: e.to_string(),
            })?;
        out.push('\n');
        Ok(out)
    }
}

fn version_spec(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blocks() -> ConfigBlocks {
        ConfigBlocks {
            test_runner: json!({ "testEnvironment": "node" }),
            transpiler: json!({ "presets": ["react-app"] }),
            lint: json!({ "extends": "react-app" }),
        }
    }

    fn template() -> Manifest {
        Manifest::from_value(json!({
            "name": "react-scripts",
            "bin": { "react-scripts": "./bin/react-scripts.js" },
            "dependencies": { "A": "1.0", "B": "2.0", "webpack": "1.14.0" },
            "optionalDependencies": { "B": "2.0" }
        }))
        .unwrap()
    }

    #[test]
    fn optional_dependencies_are_not_copied() {
        let mut target = Manifest::from_value(json!({ "name": "my-app" })).unwrap();
        let report = target
            .merge_template(&template(), "react-scripts", blocks())
            .unwrap();

        let deps = target.dependencies(DependencyKind::Runtime).unwrap().unwrap();
        assert!(deps.contains_key("A"));
        assert!(!deps.contains_key("B"));
        assert_eq!(report.copied.len(), 2);
    }

    #[test]
    fn template_versions_win() {
        let mut target = Manifest::from_value(json!({
            "name": "my-app",
            "dependencies": { "webpack": "^2.0.0", "react": "^15.4.0" }
        }))
        .unwrap();
        target
            .merge_template(&template(), "react-scripts", blocks())
            .unwrap();

        let deps = target.dependencies(DependencyKind::Runtime).unwrap().unwrap();
        assert_eq!(deps["webpack"], json!("1.14.0"));
        assert_eq!(deps["react"], json!("^15.4.0"));
    }

    #[test]
    fn scaffolding_package_is_removed_from_both_maps() {
        let mut target = Manifest::from_value(json!({
            "name": "my-app",
            "dependencies": { "react-scripts": "0.9.0" },
            "devDependencies": { "react-scripts": "0.9.0", "jest-cli": "18.0.0" }
        }))
        .unwrap();
        let report = target
            .merge_template(&template(), "react-scripts", blocks())
            .unwrap();

        for kind in [DependencyKind::Runtime, DependencyKind::Dev] {
            let map = target.dependencies(kind).unwrap().unwrap();
            assert!(!map.contains_key("react-scripts"));
        }
        assert_eq!(report.removed.len(), 2);
        assert!(
            target.dependencies(DependencyKind::Dev).unwrap().unwrap().contains_key("jest-cli")
        );
    }

    #[test]
    fn removing_absent_dependency_is_a_no_op() {
        let mut target = Manifest::from_value(json!({
            "dependencies": { "react": "15.0.0" }
        }))
        .unwrap();
        let before = target.clone();

        assert_eq!(target.remove_dependency(DependencyKind::Runtime, "nope").unwrap(), None);
        assert_eq!(target.remove_dependency(DependencyKind::Dev, "nope").unwrap(), None);
        assert_eq!(target, before);
    }

    #[test]
    fn unrelated_fields_survive_and_keys_are_injected() {
        let mut target = Manifest::from_value(json!({
            "name": "my-app",
            "private": true,
            "scripts": { "deploy": "gh-pages -d build" }
        }))
        .unwrap();
        target
            .merge_template(&template(), "react-scripts", blocks())
            .unwrap();

        assert_eq!(target.name(), Some("my-app"));
        assert_eq!(target.get("private"), Some(&json!(true)));
        assert_eq!(target.get("scripts"), Some(&json!({ "deploy": "gh-pages -d build" })));
        assert_eq!(target.get("jest"), Some(&json!({ "testEnvironment": "node" })));
        assert_eq!(target.get("babel"), Some(&json!({ "presets": ["react-app"] })));
        assert_eq!(target.get("eslintConfig"), Some(&json!({ "extends": "react-app" })));
    }

    #[test]
    fn own_name_is_never_copied_back() {
        let template = Manifest::from_value(json!({
            "name": "react-scripts",
            "dependencies": { "react-scripts": "0.9.0" }
        }))
        .unwrap();
        let mut target = Manifest::from_value(json!({})).unwrap();
        target.merge_template(&template, "react-scripts", blocks()).unwrap();
        let deps = target.dependencies(DependencyKind::Runtime).unwrap();
        assert!(deps.is_none_or(|d| !d.contains_key("react-scripts")));
    }

    #[test]
    fn serialization_uses_two_spaces_and_trailing_newline() {
        let manifest = Manifest::from_value(json!({ "name": "x", "version": "1.0.0" })).unwrap();
        assert_eq!(
            manifest.to_pretty_string().unwrap(),
            "{\n  \"name\": \"x\",\n  \"version\": \"1.0.0\"\n}\n"
        );
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(Manifest::parse("[1, 2]").is_err());
        assert!(Manifest::parse("not json").is_err());
        let bad = Manifest::from_value(json!({ "dependencies": "x" })).unwrap();
        assert!(bad.dependencies(DependencyKind::Runtime).is_err());
    }
}
