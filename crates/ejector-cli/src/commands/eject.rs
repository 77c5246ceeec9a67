//! Implementation of the eject command.
//!
//! Responsibility: resolve paths, wire adapters into the core `EjectService`,
//! and report the outcome. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use ejector_adapters::{GitWorkingTree, LocalFilesystem, ProcessRunner};
use ejector_core::application::{
    EjectOutcome, EjectRequest, EjectService, ports::Confirmation, services::EjectSummary,
};

use crate::{
    cli::EjectArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    progress::ConsoleProgress,
    prompt::{AssumeYes, TerminalPrompt},
};

/// Default location of the scaffolding package inside a project.
const DEFAULT_TEMPLATE_DIR: &str = "node_modules/react-scripts";

/// Execute an ejection.
///
/// 1. Resolve the project and template directories
/// 2. Pick the confirmation strategy (`--yes` or a prompt)
/// 3. Run `EjectService` with the local adapters
/// 4. Print the outcome
#[instrument(skip_all)]
pub fn execute(args: EjectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project_root = match &args.project_dir {
        Some(dir) => canonical_dir(dir)?,
        None => {
            let cwd = std::env::current_dir()
                .with_cli_context(|| "reading the current directory")?;
            canonical_dir(&cwd)?
        }
    };
    let template_root = resolve_template_dir(&template_dir(&args, &config, &project_root))?;

    debug!(
        project = %project_root.display(),
        template = %template_root.display(),
        skip_install = args.skip_install,
        "Paths resolved"
    );

    let confirmation: Box<dyn Confirmation> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt)
    };

    let service = EjectService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(GitWorkingTree::new()),
        confirmation,
        Box::new(ProcessRunner::new()),
    );

    let mut request = EjectRequest::new(&project_root, &template_root);
    request.install = (!args.skip_install).then(|| config.install_tools());

    let progress = ConsoleProgress::new(&output);
    match service.eject(&request, &progress)? {
        EjectOutcome::Declined => {
            info!("Eject aborted by user");
            output.header("Close one! Eject aborted.")?;
        }
        EjectOutcome::Ejected(summary) => {
            report(&summary, &template_root, &project_root, &output)?;
        }
    }

    Ok(())
}

/// `--template-dir`, then `[paths] template_dir`, then the default.
///
/// Relative config values are taken from the project root.
fn template_dir(args: &EjectArgs, config: &AppConfig, project_root: &Path) -> PathBuf {
    if let Some(dir) = &args.template_dir {
        return dir.clone();
    }
    match &config.paths.template_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => project_root.join(dir),
        None => project_root.join(DEFAULT_TEMPLATE_DIR),
    }
}

/// Canonical form of the template directory when it exists.
///
/// A missing directory is passed on as an absolute path; the service
/// reports it once the user has confirmed.
fn resolve_template_dir(path: &Path) -> CliResult<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Template directory not resolved");
            std::path::absolute(path).with_cli_context(|| "resolving the template directory")
        }
    }
}

fn canonical_dir(path: &Path) -> CliResult<PathBuf> {
    let resolved = path.canonicalize().map_err(|source| CliError::DirectoryNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if !resolved.is_dir() {
        return Err(CliError::DirectoryNotFound {
            path: path.to_path_buf(),
            source: std::io::Error::other("not a directory"),
        });
    }
    Ok(resolved)
}

fn report(
    summary: &EjectSummary,
    template_root: &Path,
    project_root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    if !summary.footprint_removed && template_root.starts_with(project_root) {
        output.warning(&format!(
            "Some files of {} could not be removed; delete them yourself.",
            template_root.display()
        ))?;
    }

    output.blank()?;
    output
        .success("Ejected successfully!")
        .with_cli_context(|| "writing the final status")?;
    output.blank()?;
    Ok(())
}
