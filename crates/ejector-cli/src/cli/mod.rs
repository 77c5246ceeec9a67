//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names and help
//! text. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "ejector",
    bin_name = "ejector",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Copy hidden build configuration into your project and drop the scaffolding dependency",
    long_about = "Ejector copies the build configuration and scripts of an installed \
                  scaffolding package into the project, rewrites package.json so the \
                  project depends on the underlying tools directly, removes the package \
                  and reinstalls dependencies. This is a one-way operation.",
    after_help = "EXAMPLES:\n\
        \x20 ejector\n\
        \x20 ejector --yes --skip-install\n\
        \x20 ejector --project-dir ./my-app --template-dir ./my-app/node_modules/react-scripts",
)]
pub struct Cli {
    /// Flags shared by every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub eject: EjectArgs,
}

// ── eject ─────────────────────────────────────────────────────────────────────

/// What to eject and how.
#[derive(Debug, Args)]
pub struct EjectArgs {
    /// Answer the confirmation prompt with "yes".
    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    pub yes: bool,

    /// Root of the project to eject.
    #[arg(
        long = "project-dir",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    /// Installed copy of the scaffolding package.
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        help = "Scaffolding package root (default: <project>/node_modules/react-scripts)"
    )]
    pub template_dir: Option<PathBuf>,

    #[arg(long = "skip-install", help = "Do not run the dependency installer afterwards")]
    pub skip_install: bool,
}

// ── tests ─────────────────────────────────────────────────────────────────────
