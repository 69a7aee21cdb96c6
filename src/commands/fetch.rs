//! Fetch command handler
//!
//! Fetches and vendors into a workspace that is left in place.

use std::path::PathBuf;

use anyhow::Result;

use packer::presentation::create_packer;
use packer::presentation::output::render_fetch;

use super::{source_from_args, with_workdir, CommandContext};

/// Execute the fetch command
pub fn cmd_fetch(
    ctx: &CommandContext,
    source: String,
    revision: Option<String>,
    workdir: Option<PathBuf>,
) -> Result<()> {
    let config = with_workdir(ctx.config.clone(), workdir);
    let mut packer = create_packer(
        source_from_args(source, revision),
        config,
        ctx.events.clone(),
    )?;

    if let Err(err) = packer.build() {
        ctx.report_kept_workspace(&packer);
        return Err(err.into());
    }

    let workdir = packer.workdir()?;
    let app_dir = packer.app_dir()?;
    ctx.print(&render_fetch(&workdir, &app_dir));
    Ok(())
}
