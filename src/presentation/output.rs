//! Output Rendering
//!
//! Final results of each command, as text or as one JSON object.

use std::path::Path;

use serde_json::{json, Value};

use crate::domain::entities::{Artifact, PackageIdentity};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// A command result ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub json: Value,
}

impl Rendered {
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.text.clone(),
            OutputFormat::Json => self.json.to_string(),
        }
    }
}

pub fn render_pack(artifact: &Artifact, identity: &PackageIdentity) -> Rendered {
    Rendered {
        text: format!(
            "Packed {} {} -> {} ({} bytes, {})",
            identity.name,
            identity.version,
            artifact.path().display(),
            artifact.size(),
            artifact.checksum()
        ),
        json: json!({
            "type": "pack_complete",
            "name": identity.name,
            "version": identity.version,
            "path": artifact.path().display().to_string(),
            "size": artifact.size(),
            "checksum": artifact.checksum().as_str(),
        }),
    }
}

pub fn render_fetch(workdir: &Path, app_dir: &Path) -> Rendered {
    Rendered {
        text: app_dir.display().to_string(),
        json: json!({
            "type": "fetch_complete",
            "workdir": workdir.display().to_string(),
            "app_dir": app_dir.display().to_string(),
        }),
    }
}

pub fn render_version(identity: &PackageIdentity) -> Rendered {
    Rendered {
        text: identity.version.clone(),
        json: json!({
            "type": "version",
            "name": identity.name,
            "version": identity.version,
        }),
    }
}

pub fn render_clean(workdir: &Path) -> Rendered {
    Rendered {
        text: format!("Removed {}", workdir.display()),
        json: json!({
            "type": "clean_complete",
            "workdir": workdir.display().to_string(),
        }),
    }
}

/// Hint printed when a run fails and its workspace is left behind
pub fn render_failed_workspace(workdir: &Path) -> Rendered {
    Rendered {
        text: format!(
            "Workspace kept for inspection: {}\nRemove it with: packer clean --workdir {}",
            workdir.display(),
            workdir.display()
        ),
        json: json!({
            "type": "workspace_kept",
            "workdir": workdir.display().to_string(),
        }),
    }
}
