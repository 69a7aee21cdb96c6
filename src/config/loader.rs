//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PackerError, PackerResult};

use super::types::{ArchiveBackend, PackerConfig};

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "packer.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PackerResult<(PackerConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: PackerConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PackerError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Find the config to use and apply environment overrides
///
/// An explicit path must exist. Otherwise `./packer.toml`, then
/// `<config dir>/packer/config.toml`, then built-in defaults.
pub fn discover(explicit: Option<&Path>) -> PackerResult<(PackerConfig, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => candidate_paths().into_iter().find(|p| p.is_file()),
    };

    let (config, warnings) = match candidate {
        Some(path) => load_with_warnings(&path)?,
        None => (PackerConfig::default(), Vec::new()),
    };

    Ok((with_env_overrides(config), warnings))
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(PROJECT_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("packer").join("config.toml"));
    }
    paths
}

/// Apply environment variable overrides (PACKER_* prefix)
pub fn with_env_overrides(config: PackerConfig) -> PackerConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub(crate) fn apply_overrides<F>(mut config: PackerConfig, lookup: F) -> PackerConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = lookup("PACKER_WORKDIR").filter(|v| !v.is_empty()) {
        config.workspace.root = Some(PathBuf::from(root));
    }

    if let Some(program) = lookup("PACKER_GIT").filter(|v| !v.is_empty()) {
        config.git.program = program;
    }

    if let Some(backend) = lookup("PACKER_ARCHIVE_BACKEND").and_then(|v| ArchiveBackend::parse(&v))
    {
        config.archive.backend = backend;
    }

    if let Some(dir) = lookup("PACKER_OUTPUT_DIR").filter(|v| !v.is_empty()) {
        config.archive.output_dir = PathBuf::from(dir);
    }

    if let Some(val) = lookup("PACKER_KEEP_WORKDIR") {
        config.workspace.keep = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes");
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "workspace",
        "root",
        "app_dir",
        "keep",
        "git",
        "program",
        "installer",
        "name",
        "manifest",
        "lockfile",
        "args",
        "vendor_dir",
        "clear_env",
        "env",
        "archive",
        "backend",
        "exclude",
        "output_dir",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
