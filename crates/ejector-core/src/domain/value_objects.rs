//! Small immutable values shared across the ejection domain.

use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Manifest vocabulary
// ============================================================================

/// Which dependency map of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Runtime,
    Dev,
    Optional,
}

impl DependencyKind {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Runtime => "dependencies",
            Self::Dev => "devDependencies",
            Self::Optional => "optionalDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Configuration keys injected into the target manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKey {
    TestRunner,
    Transpiler,
    Lint,
}

impl ManifestKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TestRunner => "jest",
            Self::Transpiler => "babel",
            Self::Lint => "eslintConfig",
        }
    }

    /// Human name of the tool the block configures.
    pub const fn tool(self) -> &'static str {
        match self {
            Self::TestRunner => "Jest",
            Self::Transpiler => "Babel",
            Self::Lint => "ESLint",
        }
    }
}

impl fmt::Display for ManifestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Orchestration
// ============================================================================

/// States of one ejection run.
///
/// `Done` and `Aborted` are terminal. `Aborted` is only reached before the
/// first write: a declined prompt, a dirty tree, or a failed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EjectPhase {
    AwaitingConfirmation,
    CheckingRepoCleanliness,
    Planning,
    Materializing,
    MergingManifest,
    RemovingFootprint,
    InvokingInstall,
    Done,
    Aborted,
}

impl fmt::Display for EjectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AwaitingConfirmation => "awaiting-confirmation",
            Self::CheckingRepoCleanliness => "checking-repo-cleanliness",
            Self::Planning => "planning",
            Self::Materializing => "materializing",
            Self::MergingManifest => "merging-manifest",
            Self::RemovingFootprint => "removing-footprint",
            Self::InvokingInstall => "invoking-install",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// The external dependency-installation command to run after ejecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    /// Pick yarn when the project has a yarn lockfile, npm otherwise.
    pub fn select(has_lockfile: bool, tools: &InstallTools) -> Self {
        if has_lockfile {
            Self {
                program: tools.yarn_program.clone(),
                args: Vec::new(),
            }
        } else {
            Self {
                program: tools.npm_program.clone(),
                args: vec!["install".into()],
            }
        }
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Installer programs and the lockfile that chooses between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTools {
    pub npm_program: String,
    pub yarn_program: String,
    pub lockfile: PathBuf,
}

impl Default for InstallTools {
    fn default() -> Self {
        Self {
            npm_program: "npm".into(),
            yarn_program: "yarnpkg".into(),
            lockfile: PathBuf::from("yarn.lock"),
        }
    }
}

// ============================================================================
// Template layout
// ============================================================================

/// Where things live inside the template and project trees.
///
/// Fixed when the tool is built; nothing here is discovered at run time
/// except the file listing of `folders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    /// Folders whose files are ejected, parents first.
    pub folders: Vec<PathBuf>,
    pub manifest_file: PathBuf,
    pub transpiler_config_file: PathBuf,
    pub lint_config_file: PathBuf,
    /// Project file that, when present, is wired into the test-runner config.
    pub test_setup_file: PathBuf,
    /// Directory of executable links inside the project.
    pub bin_dir: PathBuf,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            folders: vec![
                PathBuf::from("config"),
                Path::new("config").join("jest"),
                PathBuf::from("scripts"),
            ],
            manifest_file: PathBuf::from("package.json"),
            transpiler_config_file: PathBuf::from("babelrc"),
            lint_config_file: PathBuf::from("eslintrc"),
            test_setup_file: Path::new("src").join("setupTests.js"),
            bin_dir: Path::new("node_modules").join(".bin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockfile_selects_yarn() {
        let cmd = InstallCommand::select(true, &InstallTools::default());
        assert_eq!(cmd.program, "yarnpkg");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn no_lockfile_selects_npm_install() {
        let cmd = InstallCommand::select(false, &InstallTools::default());
        assert_eq!(cmd.to_string(), "npm install");
    }

    #[test]
    fn manifest_keys_match_tool_conventions() {
        assert_eq!(ManifestKey::TestRunner.as_str(), "jest");
        assert_eq!(ManifestKey::Transpiler.as_str(), "babel");
        assert_eq!(ManifestKey::Lint.as_str(), "eslintConfig");
    }

    #[test]
    fn default_layout_lists_parents_first() {
        let layout = TemplateLayout::default();
        assert_eq!(layout.folders[0], PathBuf::from("config"));
        assert_eq!(layout.folders[1], Path::new("config").join("jest"));
    }
}
