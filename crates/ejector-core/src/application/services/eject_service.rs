//! Eject Service - main application orchestrator.
//!
//! This service drives one ejection from start to finish:
//! 1. Ask for confirmation
//! 2. Refuse to run on a dirty working tree
//! 3. Enumerate, plan and read everything that is needed
//! 4. Materialize template files into the project
//! 5. Merge and write the project manifest
//! 6. Remove the scaffolding package's footprint (best effort)
//! 7. Run the dependency installer
//!
//! Steps 1-3 never write. From step 4 on there is no rollback: a failure
//! leaves whatever was already written, and version control is the way back.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Confirmation, EjectObserver, Filesystem, InstallStatus, WorkingTree},
        services::materializer::{EntrySource, FolderScan, MaterializeReport, Materializer},
    },
    domain::{
        AnnotationRules, ConfigBlocks, EjectPhase, EjectionPlan, FootprintDescriptor,
        InstallCommand, InstallTools, Manifest, MergeReport, TemplateLayout, TestRunnerOptions,
        build_test_runner_config, root_dir_resolver,
    },
    error::EjectResult,
};

/// The question put to the user before anything happens.
pub const CONFIRM_QUESTION: &str = "Are you sure you want to eject? This action is permanent.";

/// Everything one run needs to know, passed in explicitly.
#[derive(Debug, Clone)]
pub struct EjectRequest {
    /// Root of the project being ejected.
    pub project_root: PathBuf,
    /// Root of the scaffolding package's installed copy.
    pub template_root: PathBuf,
    pub layout: TemplateLayout,
    /// `None` skips the installer.
    pub install: Option<InstallTools>,
}

impl EjectRequest {
    pub fn new(project_root: impl Into<PathBuf>, template_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            template_root: template_root.into(),
            layout: TemplateLayout::default(),
            install: Some(InstallTools::default()),
        }
    }

    pub fn without_install(mut self) -> Self {
        self.install = None;
        self
    }
}

/// Summary of a completed ejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EjectSummary {
    pub files: MaterializeReport,
    pub merge: MergeReport,
    pub footprint_removed: bool,
    pub install: Option<(InstallCommand, InstallStatus)>,
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EjectOutcome {
    /// The user said no; nothing was touched.
    Declined,
    Ejected(EjectSummary),
}

/// Inputs gathered during planning, before the first write.
struct Prepared {
    plan: EjectionPlan,
    rules: AnnotationRules,
    target_manifest: Manifest,
    template_manifest: Manifest,
    footprint: FootprintDescriptor,
    blocks: ConfigBlocks,
}

/// Main ejection service.
pub struct EjectService {
    filesystem: Box<dyn Filesystem>,
    working_tree: Box<dyn WorkingTree>,
    confirmation: Box<dyn Confirmation>,
    runner: Box<dyn CommandRunner>,
}

impl EjectService {
    /// Create a new eject service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        working_tree: Box<dyn WorkingTree>,
        confirmation: Box<dyn Confirmation>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            filesystem,
            working_tree,
            confirmation,
            runner,
        }
    }

    /// Run one ejection.
    #[instrument(
        skip_all,
        fields(
            project = %request.project_root.display(),
            template = %request.template_root.display()
        )
    )]
    pub fn eject(
        &self,
        request: &EjectRequest,
        observer: &dyn EjectObserver,
    ) -> EjectResult<EjectOutcome> {
        let prepared = match self.preflight(request, observer) {
            Ok(Some(prepared)) => prepared,
            Ok(None) => {
                observer.phase(EjectPhase::Aborted);
                return Ok(EjectOutcome::Declined);
            }
            Err(e) => {
                observer.phase(EjectPhase::Aborted);
                return Err(e);
            }
        };

        observer.phase(EjectPhase::Materializing);
        observer.copying_into(&request.project_root);
        let files = Materializer::new(self.filesystem.as_ref(), &prepared.rules, observer)
            .materialize(&prepared.plan, &request.template_root, &request.project_root)?;
        info!(
            written = files.written.len(),
            skipped = files.skipped.len(),
            "Template files copied"
        );

        observer.phase(EjectPhase::MergingManifest);
        let Prepared {
            mut target_manifest,
            template_manifest,
            footprint,
            blocks,
            ..
        } = prepared;
        let merge =
            target_manifest.merge_template(&template_manifest, &footprint.package_name, blocks)?;
        for (kind, name) in &merge.removed {
            observer.dependency_removed(name, *kind);
        }
        for (name, version) in &merge.copied {
            observer.dependency_added(name, version);
        }
        for key in &merge.injected {
            observer.config_injected(*key);
        }
        let manifest_path = request.project_root.join(&request.layout.manifest_file);
        self.filesystem
            .write_file(&manifest_path, &target_manifest.to_pretty_string()?)?;
        info!(path = %manifest_path.display(), "Manifest written");

        observer.phase(EjectPhase::RemovingFootprint);
        let footprint_removed = self.remove_footprint(&footprint, request);

        observer.phase(EjectPhase::InvokingInstall);
        let install = request
            .install
            .as_ref()
            .map(|tools| self.install(tools, &request.project_root, observer));

        observer.phase(EjectPhase::Done);
        info!("Ejected successfully");

        Ok(EjectOutcome::Ejected(EjectSummary {
            files,
            merge,
            footprint_removed,
            install,
        }))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Confirm, check the working tree and plan. `None` when declined.
    fn preflight(
        &self,
        request: &EjectRequest,
        observer: &dyn EjectObserver,
    ) -> EjectResult<Option<Prepared>> {
        observer.phase(EjectPhase::AwaitingConfirmation);
        if !self.confirmation.confirm(CONFIRM_QUESTION)? {
            info!("Eject declined");
            return Ok(None);
        }

        observer.phase(EjectPhase::CheckingRepoCleanliness);
        let pending = self.working_tree.pending_changes(&request.project_root);
        if !pending.is_empty() {
            warn!(count = pending.len(), "Working tree is dirty");
            return Err(ApplicationError::DirtyWorkingTree { paths: pending }.into());
        }

        observer.phase(EjectPhase::Planning);
        let prepared = self.prepare(request)?;
        info!(
            directories = prepared.plan.directories().len(),
            files = prepared.plan.files().len(),
            "Ejection planned"
        );
        Ok(Some(prepared))
    }

    /// Plan and read every input. Nothing is written here.
    fn prepare(&self, request: &EjectRequest) -> EjectResult<Prepared> {
        let fs = self.filesystem.as_ref();
        let layout = &request.layout;

        if !fs.is_dir(&request.template_root) {
            return Err(ApplicationError::FilesystemError {
                path: request.template_root.clone(),
                reason: "scaffolding package not found".into(),
            }
            .into());
        }

        let entries =
            FolderScan::new(fs, &request.template_root, &layout.folders).entries()?;
        let plan = EjectionPlan::build(&request.project_root, &entries, |p| fs.exists(p))?;
        let rules = AnnotationRules::eject_defaults()?;

        let template_manifest = self.read_manifest(&request.template_root.join(&layout.manifest_file))?;
        let target_manifest = self.read_manifest(&request.project_root.join(&layout.manifest_file))?;
        let footprint = FootprintDescriptor::from_manifest(&template_manifest, &request.template_root)?;

        // Built before the first write so a failure here leaves the tree alone.
        let test_runner = build_test_runner_config(
            root_dir_resolver,
            &TestRunnerOptions {
                root_dir: None,
                ejecting: true,
                has_setup_file: fs.exists(&request.project_root.join(&layout.test_setup_file)),
            },
        );
        let blocks = ConfigBlocks {
            test_runner,
            transpiler: self.read_json(&request.template_root.join(&layout.transpiler_config_file))?,
            lint: self.read_json(&request.template_root.join(&layout.lint_config_file))?,
        };

        Ok(Prepared {
            plan,
            rules,
            target_manifest,
            template_manifest,
            footprint,
            blocks,
        })
    }

    fn read_manifest(&self, path: &Path) -> EjectResult<Manifest> {
        let text = self.filesystem.read_to_string(path)?;
        Manifest::parse(&text).map_err(|e| {
            ApplicationError::ManifestParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn read_json(&self, path: &Path) -> EjectResult<Value> {
        let text = self.filesystem.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            ApplicationError::ManifestParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Best-effort removal of executable links and the installed package.
    ///
    /// Returns whether everything was removed. Never fails the run.
    fn remove_footprint(&self, footprint: &FootprintDescriptor, request: &EjectRequest) -> bool {
        if !footprint.is_owned_by(&request.project_root) {
            info!(
                package = %footprint.installed_package_dir.display(),
                "Scaffolding package lives outside the project, leaving it alone"
            );
            return false;
        }

        let mut clean = true;
        let bin_dir = request.project_root.join(&request.layout.bin_dir);
        for link in footprint.executable_links(&bin_dir) {
            if let Err(e) = self.filesystem.remove_file(&link) {
                warn!(error = %e, path = %link.display(), "Could not remove executable link");
                clean = false;
            }
        }
        if let Err(e) = self.filesystem.remove_dir_all(&footprint.installed_package_dir) {
            warn!(
                error = %e,
                path = %footprint.installed_package_dir.display(),
                "Could not remove scaffolding package"
            );
            clean = false;
        }
        debug!(clean, "Footprint removal finished");
        clean
    }

    fn install(
        &self,
        tools: &InstallTools,
        project_root: &Path,
        observer: &dyn EjectObserver,
    ) -> (InstallCommand, InstallStatus) {
        let has_lockfile = self.filesystem.exists(&project_root.join(&tools.lockfile));
        let command = InstallCommand::select(has_lockfile, tools);

        observer.install_started(&command);
        info!(command = %command, "Installing dependencies");
        let status = self.runner.run(&command.program, &command.args, project_root);
        if !status.is_success() {
            warn!(command = %command, status = ?status, "Dependency installation did not succeed");
        }
        observer.install_finished(&command, &status);

        (command, status)
    }
}
