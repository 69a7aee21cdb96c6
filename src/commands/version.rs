//! Version command handler

use std::path::PathBuf;

use anyhow::Result;

use packer::presentation::create_packer;
use packer::presentation::output::render_version;

use super::{source_from_args, with_workdir, CommandContext};

/// Execute the version command
///
/// On success a generated workspace is removed; an explicit or kept one
/// stays so a later `fetch` or `pack` can reuse the checkout. A failed
/// lookup leaves the workspace for inspection.
pub fn cmd_version(
    ctx: &CommandContext,
    source: String,
    revision: Option<String>,
    workdir: Option<PathBuf>,
) -> Result<()> {
    let config = with_workdir(ctx.config.clone(), workdir);
    let disposable = config.workspace.root.is_none() && !config.workspace.keep;
    let mut packer = create_packer(
        source_from_args(source, revision),
        config,
        ctx.events.clone(),
    )?;

    let identity = match packer.identity() {
        Ok(identity) => identity,
        Err(err) => {
            ctx.report_kept_workspace(&packer);
            return Err(err.into());
        }
    };
    if disposable {
        packer.clean()?;
    }

    ctx.print(&render_version(&identity));
    Ok(())
}
