//! Command handlers for the packer binary

pub mod clean;
pub mod fetch;
pub mod pack;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use packer::config::ConfigWarning;
use packer::domain::ports::PackEventSink;
use packer::presentation::output::render_failed_workspace;
use packer::presentation::{create_event_sink, Cli, OutputFormat, Rendered};
use packer::{PackageSource, Packer, PackerConfig};

/// Everything a handler needs besides its own arguments
pub struct CommandContext {
    pub config: PackerConfig,
    pub events: Arc<dyn PackEventSink>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Discover config, report its warnings, and pick the event sink
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config, warnings) = PackerConfig::discover(cli.config.as_deref())?;
        let format = OutputFormat::from_json_flag(cli.json);
        if format == OutputFormat::Text {
            print_config_warnings(&warnings);
        }

        Ok(Self {
            config,
            events: create_event_sink(cli.json, cli.verbose),
            format,
        })
    }

    /// Result on stdout
    pub fn print(&self, rendered: &Rendered) {
        println!("{}", rendered.render(self.format));
    }

    /// Diagnostics: stderr in text mode, the NDJSON stream in JSON mode
    pub fn print_diagnostic(&self, rendered: &Rendered) {
        match self.format {
            OutputFormat::Text => eprintln!("{}", rendered.render(self.format)),
            OutputFormat::Json => println!("{}", rendered.render(self.format)),
        }
    }

    /// Point at the workspace a failed run left behind
    pub fn report_kept_workspace(&self, packer: &Packer) {
        if let Some(root) = packer.current_workdir().filter(|r| r.exists()) {
            self.print_diagnostic(&render_failed_workspace(root));
        }
    }
}

/// Source from CLI arguments
pub fn source_from_args(locator: String, revision: Option<String>) -> PackageSource {
    let source = PackageSource::new(locator);
    match revision {
        Some(rev) => source.with_revision(rev),
        None => source,
    }
}

/// Config with an optional `--workdir` applied
pub fn with_workdir(mut config: PackerConfig, workdir: Option<PathBuf>) -> PackerConfig {
    if let Some(root) = workdir {
        config.workspace.root = Some(root);
    }
    config
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        match &warning.suggestion {
            Some(suggestion) => eprintln!(
                "Warning: unknown config key '{}' in {}. Did you mean '{}'?",
                warning.key, location, suggestion
            ),
            None => eprintln!(
                "Warning: unknown config key '{}' in {}",
                warning.key, location
            ),
        }
    }
}
