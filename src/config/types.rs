//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PackerResult;

use super::loader::{self, ConfigWarning};

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Fixed workspace root; a fresh temporary directory is used when unset
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Subdirectory of the root holding the checkout
    #[serde(default = "default_app_dir")]
    pub app_dir: String,

    /// Keep the workspace after a successful `pack`
    #[serde(default)]
    pub keep: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            app_dir: default_app_dir(),
            keep: false,
        }
    }
}

fn default_app_dir() -> String {
    "app".to_string()
}

/// Version-control client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_git_program")]
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
        }
    }
}

fn default_git_program() -> String {
    "git".to_string()
}

/// Dependency installer configuration
///
/// Values in `args` and `env` may contain `{app_dir}`, `{vendor_dir}` and
/// `{manifest}` placeholders, expanded to absolute paths at install time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    #[serde(default = "default_installer_name")]
    pub name: String,

    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default = "default_lockfile")]
    pub lockfile: Option<String>,

    #[serde(default = "default_installer_program")]
    pub program: String,

    #[serde(default = "default_installer_args")]
    pub args: Vec<String>,

    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: String,

    /// Variables removed from the installer environment
    #[serde(default = "default_clear_env")]
    pub clear_env: Vec<String>,

    /// Variables set in the installer environment
    #[serde(default = "default_installer_env")]
    pub env: BTreeMap<String, String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            name: default_installer_name(),
            manifest: default_manifest(),
            lockfile: default_lockfile(),
            program: default_installer_program(),
            args: default_installer_args(),
            vendor_dir: default_vendor_dir(),
            clear_env: default_clear_env(),
            env: default_installer_env(),
        }
    }
}

fn default_installer_name() -> String {
    "bundler".to_string()
}

fn default_manifest() -> String {
    "Gemfile".to_string()
}

fn default_lockfile() -> Option<String> {
    Some("Gemfile.lock".to_string())
}

fn default_installer_program() -> String {
    "bundle".to_string()
}

fn default_installer_args() -> Vec<String> {
    vec!["install".to_string()]
}

fn default_vendor_dir() -> String {
    "vendor/bundle".to_string()
}

fn default_clear_env() -> Vec<String> {
    [
        "BUNDLE_APP_CONFIG",
        "BUNDLE_BIN_PATH",
        "BUNDLE_GEMFILE",
        "BUNDLE_PATH",
        "BUNDLE_WITHOUT",
        "BUNDLER_VERSION",
        "GEM_HOME",
        "GEM_PATH",
        "RUBYLIB",
        "RUBYOPT",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_installer_env() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("BUNDLE_GEMFILE".to_string(), "{manifest}".to_string());
    env.insert("BUNDLE_PATH".to_string(), "{vendor_dir}".to_string());
    env.insert("BUNDLE_IGNORE_CONFIG".to_string(), "1".to_string());
    env
}

/// Archive backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveBackend {
    /// In-process tar + gzip
    #[default]
    Builtin,
    /// External `tar -czf`
    Tar,
}

impl ArchiveBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "builtin" | "internal" => Some(ArchiveBackend::Builtin),
            "tar" => Some(ArchiveBackend::Tar),
            _ => None,
        }
    }
}

/// Archive configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub backend: ArchiveBackend,

    /// Extra paths (relative to the app directory) left out of the archive
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory receiving `<name>-<version>.tar.gz` when no output is given
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            backend: ArchiveBackend::default(),
            exclude: Vec::new(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackerConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub installer: InstallerConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,
}

impl PackerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PackerResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PackerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from explicit, project, or user config, falling back to defaults
    pub fn discover(explicit: Option<&Path>) -> PackerResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(explicit)
    }

    /// Apply environment variable overrides (PACKER_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
