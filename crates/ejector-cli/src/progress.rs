//! Human-readable progress for an ejection.

use std::path::Path;

use ejector_core::{
    application::ports::{EjectObserver, InstallStatus},
    domain::{DependencyKind, EjectPhase, InstallCommand, ManifestKey, RelativePath},
};

use crate::output::OutputManager;

/// Prints each step of the run as it happens.
///
/// Terminal write failures are ignored here; they never abort an ejection
/// that is already under way.
pub struct ConsoleProgress<'a> {
    output: &'a OutputManager,
}

impl<'a> ConsoleProgress<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self { output }
    }

    fn section(&self, title: &str) {
        let _ = self.output.blank();
        let _ = self.output.header(title);
    }

    fn item(&self, before: &str, subject: &str, after: &str) {
        let _ = self
            .output
            .print(&format!("  {before}{}{after}", self.output.highlight(subject)));
    }
}

impl EjectObserver for ConsoleProgress<'_> {
    fn phase(&self, phase: EjectPhase) {
        if phase == EjectPhase::MergingManifest {
            self.section("Updating the dependencies");
        }
    }

    fn copying_into(&self, project_root: &Path) {
        self.section(&format!("Copying files into {}", project_root.display()));
    }

    fn file_added(&self, path: &RelativePath) {
        self.item("Adding ", &path.to_string(), " to the project");
    }

    fn dependency_removed(&self, name: &str, kind: DependencyKind) {
        self.item("Removing ", name, &format!(" from {}", kind.key()));
    }

    fn dependency_added(&self, name: &str, version: &str) {
        self.item("Adding ", name, &format!(" {version} to dependencies"));
    }

    fn config_injected(&self, key: ManifestKey) {
        let what = match key {
            ManifestKey::TestRunner => " configuration",
            ManifestKey::Transpiler => " preset",
            ManifestKey::Lint => " configuration",
        };
        if key == ManifestKey::TestRunner {
            self.section("Configuring package.json");
        }
        self.item("Adding ", key.tool(), what);
    }

    fn install_started(&self, command: &InstallCommand) {
        self.section(&format!("Running {command}..."));
    }

    fn install_finished(&self, command: &InstallCommand, status: &InstallStatus) {
        let detail = match status {
            InstallStatus::Succeeded => return,
            InstallStatus::Failed { code: Some(code) } => format!("exited with status {code}"),
            InstallStatus::Failed { code: None } => "was terminated by a signal".to_owned(),
            InstallStatus::NotStarted { reason } => format!("could not be started: {reason}"),
        };
        let _ = self.output.warning(&format!(
            "`{command}` {detail}. Run it yourself to finish installing dependencies."
        ));
    }
}
