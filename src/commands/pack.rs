//! Pack command handler
//!
//! Runs the whole pipeline and prints the artifact.

use std::path::PathBuf;

use anyhow::Result;

use packer::presentation::output::render_pack;
use packer::presentation::{create_packer, BackendArg};

use super::{source_from_args, with_workdir, CommandContext};

/// Execute the pack command
pub fn cmd_pack(
    ctx: &CommandContext,
    source: String,
    revision: Option<String>,
    output: Option<PathBuf>,
    workdir: Option<PathBuf>,
    keep_workdir: bool,
    backend: Option<BackendArg>,
) -> Result<()> {
    let mut config = with_workdir(ctx.config.clone(), workdir);
    if keep_workdir {
        config.workspace.keep = true;
    }
    if let Some(backend) = backend {
        config.archive.backend = backend.into();
    }

    let mut packer = create_packer(
        source_from_args(source, revision),
        config,
        ctx.events.clone(),
    )?;

    match packer.pack(output.as_deref()) {
        Ok(artifact) => {
            let identity = packer.identity()?;
            ctx.print(&render_pack(&artifact, &identity));
            Ok(())
        }
        Err(err) => {
            ctx.report_kept_workspace(&packer);
            Err(err.into())
        }
    }
}
