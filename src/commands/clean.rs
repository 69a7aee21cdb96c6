//! Clean command handler
//!
//! Removes a workspace left behind by an earlier run.

use std::path::Path;

use anyhow::Result;

use packer::application::WorkspaceManager;
use packer::presentation::output::render_clean;

use super::CommandContext;

/// Execute the clean command
pub fn cmd_clean(ctx: &CommandContext, workdir: &Path) -> Result<()> {
    let mut workspace = WorkspaceManager::new(ctx.events.clone())
        .with_app_subdir(&ctx.config.workspace.app_dir);

    let root = workspace.adopt(workdir)?.to_path_buf();
    workspace.clean()?;

    ctx.print(&render_clean(&root));
    Ok(())
}
