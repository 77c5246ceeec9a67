use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{entities::manifest::Manifest, error::DomainError};

/// What the scaffolding package installed into the project and should take
/// away with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootprintDescriptor {
    pub package_name: String,
    pub installed_package_dir: PathBuf,
    pub executable_names: BTreeSet<String>,
}

impl FootprintDescriptor {
    /// Derive the footprint from the template's own manifest.
    ///
    /// `bin` may be a map of executable name to script, or a single script
    /// path, in which case the executable is named after the package.
    pub fn from_manifest(
        manifest: &Manifest,
        installed_package_dir: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let package_name = manifest
            .name()
            .ok_or_else(|| DomainError::InvalidManifest {
                reason: "template manifest has no 'name'".into(),
            })?
            .to_owned();

        let executable_names = match manifest.get("bin") {
            Some(Value::Object(bins)) => bins.keys().cloned().collect(),
            Some(Value::String(_)) => BTreeSet::from([unscoped(&package_name).to_owned()]),
            _ => BTreeSet::new(),
        };

        Ok(Self {
            package_name,
            installed_package_dir: installed_package_dir.into(),
            executable_names,
        })
    }

    /// Executable link paths inside `bin_dir`.
    pub fn executable_links(&self, bin_dir: &Path) -> Vec<PathBuf> {
        self.executable_names
            .iter()
            .map(|name| bin_dir.join(name))
            .collect()
    }

    /// Whether the installed copy may be deleted from `project_root`.
    ///
    /// Only a strict descendant qualifies; a package living outside the
    /// project (or being the project itself) is never removed.
    pub fn is_owned_by(&self, project_root: &Path) -> bool {
        self.installed_package_dir != project_root
            && self.installed_package_dir.starts_with(project_root)
    }
}

// `@scope/name` installs its string-form binary as `name`.
fn unscoped(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> Manifest {
        Manifest::from_value(value).unwrap()
    }

    #[test]
    fn bin_map_keys_become_executables() {
        let m = manifest(json!({
            "name": "react-scripts",
            "bin": { "react-scripts": "./bin/react-scripts.js", "rs": "./bin/rs.js" }
        }));
        let fp = FootprintDescriptor::from_manifest(&m, "/app/node_modules/react-scripts").unwrap();
        assert_eq!(
            fp.executable_names,
            BTreeSet::from(["react-scripts".to_string(), "rs".to_string()])
        );
        assert_eq!(
            fp.executable_links(Path::new("/app/node_modules/.bin")),
            vec![
                PathBuf::from("/app/node_modules/.bin/react-scripts"),
                PathBuf::from("/app/node_modules/.bin/rs"),
            ]
        );
    }

    #[test]
    fn bin_string_uses_package_name() {
        let m = manifest(json!({ "name": "@acme/scripts", "bin": "./cli.js" }));
        let fp = FootprintDescriptor::from_manifest(&m, "/x").unwrap();
        assert_eq!(fp.executable_names, BTreeSet::from(["scripts".to_string()]));
    }

    #[test]
    fn missing_name_is_invalid() {
        let m = manifest(json!({ "bin": {} }));
        assert!(FootprintDescriptor::from_manifest(&m, "/x").is_err());
    }

    #[test]
    fn only_nested_copies_are_owned() {
        let m = manifest(json!({ "name": "react-scripts" }));
        let nested = FootprintDescriptor::from_manifest(&m, "/app/node_modules/react-scripts").unwrap();
        assert!(nested.is_owned_by(Path::new("/app")));

        let outside = FootprintDescriptor::from_manifest(&m, "/usr/lib/react-scripts").unwrap();
        assert!(!outside.is_owned_by(Path::new("/app")));

        // String-prefix lookalikes are not descendants.
        let sibling = FootprintDescriptor::from_manifest(&m, "/app-other/node_modules/x").unwrap();
        assert!(!sibling.is_owned_by(Path::new("/app")));

        let itself = FootprintDescriptor::from_manifest(&m, "/app").unwrap();
        assert!(!itself.is_owned_by(Path::new("/app")));
    }
}
