//! Runs the dependency installer with the terminal attached.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, instrument};

use ejector_core::application::ports::{CommandRunner, InstallStatus};

/// Spawns commands with inherited stdin/stdout/stderr and waits for them.
///
/// On Windows a bare program name that cannot be found is retried with a
/// `.cmd` suffix, which is how npm and yarn install their launchers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip(self, args), fields(args = ?args))]
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> InstallStatus {
        match spawn(program, args, cwd) {
            Ok(status) if status.success() => InstallStatus::Succeeded,
            Ok(status) => {
                debug!(code = ?status.code(), "Command exited unsuccessfully");
                InstallStatus::Failed {
                    code: status.code(),
                }
            }
            Err(e) => InstallStatus::NotStarted {
                reason: format!("failed to start '{program}': {e}"),
            },
        }
    }
}

fn spawn(program: &str, args: &[String], cwd: &Path) -> io::Result<ExitStatus> {
    let status = attached(program, args, cwd).status();

    #[cfg(windows)]
    if matches!(&status, Err(e) if e.kind() == io::ErrorKind::NotFound) {
        if let Some(shim) = cmd_shim(program) {
            debug!(shim = %shim, "Retrying with batch launcher");
            return attached(&shim, args, cwd).status();
        }
    }

    status
}

fn attached(program: &str, args: &[String], cwd: &Path) -> Command {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    command
}

/// `npm` -> `npm.cmd`; names that already carry an extension are left alone.
#[cfg_attr(not(windows), allow(dead_code))]
fn cmd_shim(program: &str) -> Option<String> {
    Path::new(program)
        .extension()
        .is_none()
        .then(|| format!("{program}.cmd"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_get_a_cmd_launcher() {
        assert_eq!(cmd_shim("npm").as_deref(), Some("npm.cmd"));
        assert_eq!(cmd_shim("yarnpkg").as_deref(), Some("yarnpkg.cmd"));
        assert_eq!(cmd_shim("npm.exe"), None);
        assert_eq!(cmd_shim("pnpm.cmd"), None);
    }

    #[test]
    fn missing_program_is_not_started() {
        let tmp = tempfile::TempDir::new().unwrap();
        let status = ProcessRunner::new().run("ejector-no-such-program", &[], tmp.path());
        assert!(matches!(status, InstallStatus::NotStarted { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn exit_codes_are_reported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = ProcessRunner::new();
        assert_eq!(runner.run("true", &[], tmp.path()), InstallStatus::Succeeded);
        assert_eq!(
            runner.run("sh", &["-c".into(), "exit 3".into()], tmp.path()),
            InstallStatus::Failed { code: Some(3) }
        );
    }
}
