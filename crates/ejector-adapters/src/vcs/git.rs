//! Working-tree status through `git status --porcelain`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use ejector_core::application::ports::WorkingTree;

/// Reads pending changes with the `git` executable.
///
/// Anything that stops git from answering (not installed, not a repository)
/// counts as a clean tree.
#[derive(Debug, Clone)]
pub struct GitWorkingTree {
    program: PathBuf,
}

impl GitWorkingTree {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitWorkingTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkingTree for GitWorkingTree {
    fn pending_changes(&self, root: &Path) -> Vec<String> {
        let output = Command::new(&self.program)
            .args(["status", "--porcelain"])
            .current_dir(root)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                parse_porcelain(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                debug!(status = ?output.status, "git status failed, treating tree as clean");
                Vec::new()
            }
            Err(e) => {
                debug!(error = %e, "git not available, treating tree as clean");
                Vec::new()
            }
        }
    }
}

/// One entry per non-blank line, status columns kept.
fn parse_porcelain(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
