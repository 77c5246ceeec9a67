//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the values it is handed.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `EJECTOR_` prefix, `__` between sections
//!    (`EJECTOR_INSTALL__NPM_PROGRAM=pnpm`)
//! 3. Config file (`--config FILE`, or the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use ejector_core::domain::InstallTools;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "EJECTOR";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub install: InstallConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

/// Which programs install dependencies after ejecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub npm_program: String,
    pub yarn_program: String,
    /// File whose presence selects `yarn_program`.
    pub lockfile: PathBuf,
}

impl Default for InstallConfig {
    fn default() -> Self {
        let tools = InstallTools::default();
        Self {
            npm_program: tools.npm_program,
            yarn_program: tools.yarn_program,
            lockfile: tools.lockfile,
        }
    }
}

impl From<&InstallConfig> for InstallTools {
    fn from(config: &InstallConfig) -> Self {
        Self {
            npm_program: config.npm_program.clone(),
            yarn_program: config.yarn_program.clone(),
            lockfile: config.lockfile.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Overrides `<project>/node_modules/react-scripts`. Relative paths are
    /// resolved against the project root.
    pub template_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        match config_file {
            Some(path) => Self::load_from(Some((path.as_path(), true)), None),
            None => {
                let default = Self::config_path();
                Self::load_from(default.as_deref().map(|p| (p, false)), None)
            }
        }
    }

    /// Core of [`AppConfig::load`].
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        file: Option<(&Path, bool)>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("install.npm_program", defaults.install.npm_program)?
            .set_default("install.yarn_program", defaults.install.yarn_program)?
            .set_default(
                "install.lockfile",
                defaults.install.lockfile.to_string_lossy().into_owned(),
            )?
            .set_default("output.no_color", defaults.output.no_color)?;

        if let Some((path, required)) = file {
            tracing::debug!(path = %path.display(), required, "Reading configuration file");
            builder = builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Path to the default configuration file, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ejector", "ejector")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Installer programs as the core expects them.
    pub fn install_tools(&self) -> InstallTools {
        InstallTools::from(&self.install)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    #[test]
    fn defaults_match_core_install_tools() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.install_tools(), InstallTools::default());
        assert!(cfg.paths.template_dir.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let cfg = AppConfig::load_from(None, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ejector.toml");
        std::fs::write(
            &path,
            "[install]\nnpm_program = \"pnpm\"\n\n[paths]\ntemplate_dir = \"vendor/scripts\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(Some((path.as_path(), true)), no_env()).unwrap();
        assert_eq!(cfg.install.npm_program, "pnpm");
        assert_eq!(cfg.install.yarn_program, "yarnpkg");
        assert_eq!(cfg.paths.template_dir, Some(PathBuf::from("vendor/scripts")));
    }

    #[test]
    fn environment_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ejector.toml");
        std::fs::write(&path, "[install]\nyarn_program = \"yarn\"\n").unwrap();

        let mut env = config::Map::new();
        env.insert("EJECTOR_INSTALL__YARN_PROGRAM".into(), "berry".into());
        env.insert("EJECTOR_OUTPUT__NO_COLOR".into(), "true".into());

        let cfg = AppConfig::load_from(Some((path.as_path(), true)), Some(env)).unwrap();
        assert_eq!(cfg.install.yarn_program, "berry");
        assert!(cfg.output.no_color);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(AppConfig::load_from(Some((missing.as_path(), true)), no_env()).is_err());
    }

    #[test]
    fn optional_missing_file_is_fine() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(AppConfig::load_from(Some((missing.as_path(), false)), no_env()).is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "[install\n").unwrap();
        assert!(AppConfig::load_from(Some((path.as_path(), true)), no_env()).is_err());
    }
}
