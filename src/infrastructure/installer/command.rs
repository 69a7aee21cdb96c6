//! Command-driven dependency installer
//!
//! Runs a configured installer program (bundler by default) inside the app
//! directory. The child environment is built from an explicit override map:
//! ambient dependency-manager variables are removed, then the configured
//! ones are set with `{app_dir}`, `{vendor_dir}` and `{manifest}` expanded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::InstallerConfig;
use crate::domain::ports::{CommandSpec, DependencyInstaller, ProcessRunner};
use crate::domain::value_objects::EnvOverrides;
use crate::error::PackerResult;

/// Installer invoked as an external program
pub struct CommandInstaller {
    name: String,
    manifest: String,
    lockfile: Option<String>,
    program: String,
    args: Vec<String>,
    vendor_subdir: PathBuf,
    clear_env: Vec<String>,
    env: BTreeMap<String, String>,
    runner: Arc<dyn ProcessRunner>,
}

impl CommandInstaller {
    pub fn from_config(config: &InstallerConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            name: config.name.clone(),
            manifest: config.manifest.clone(),
            lockfile: config.lockfile.clone().filter(|l| !l.trim().is_empty()),
            program: config.program.clone(),
            args: config.args.clone(),
            vendor_subdir: PathBuf::from(&config.vendor_dir),
            clear_env: config.clear_env.clone(),
            env: config.env.clone(),
            runner,
        }
    }

    /// Bundler with the default vendoring layout (`vendor/bundle`)
    pub fn bundler(runner: Arc<dyn ProcessRunner>) -> Self {
        Self::from_config(&InstallerConfig::default(), runner)
    }

    fn expand(&self, template: &str, app_dir: &Path, vendor_dir: &Path) -> String {
        template
            .replace("{app_dir}", &app_dir.to_string_lossy())
            .replace("{vendor_dir}", &vendor_dir.to_string_lossy())
            .replace(
                "{manifest}",
                &self.manifest_path(app_dir).to_string_lossy(),
            )
    }

    /// The exact environment changes applied to the installer process
    pub fn environment(&self, app_dir: &Path, vendor_dir: &Path) -> EnvOverrides {
        let cleared = self
            .clear_env
            .iter()
            .fold(EnvOverrides::new(), |env, key| env.unset(key.as_str()));

        self.env.iter().fold(cleared, |env, (key, value)| {
            env.set(key.as_str(), self.expand(value, app_dir, vendor_dir))
        })
    }

    /// The command that `install` would run
    pub fn command(&self, app_dir: &Path, vendor_dir: &Path) -> CommandSpec {
        CommandSpec::new(&self.program)
            .args(
                self.args
                    .iter()
                    .map(|arg| self.expand(arg, app_dir, vendor_dir)),
            )
            .current_dir(app_dir)
            .env(self.environment(app_dir, vendor_dir))
    }
}

impl DependencyInstaller for CommandInstaller {
    fn name(&self) -> &str {
        &self.name
    }

    fn manifest_name(&self) -> &str {
        &self.manifest
    }

    fn lockfile_name(&self) -> Option<&str> {
        self.lockfile.as_deref()
    }

    fn vendor_subdir(&self) -> &Path {
        &self.vendor_subdir
    }

    fn install(&self, app_dir: &Path, vendor_dir: &Path) -> PackerResult<()> {
        std::fs::create_dir_all(vendor_dir)?;
        self.runner.run_checked(&self.command(app_dir, vendor_dir))?;
        Ok(())
    }
}
