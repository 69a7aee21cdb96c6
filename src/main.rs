//! Packer CLI - package a git repository into a self-contained tarball
//!
//! Usage: packer <COMMAND>
//!
//! Commands:
//!   pack     Fetch, vendor, and archive a repository
//!   fetch    Fetch and vendor into a workspace, then print the app directory
//!   version  Print the short version a pack would carry
//!   clean    Remove a leftover workspace

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use packer::presentation::{Cli, Commands};

use commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    let result = run(cli);
    if let (true, Err(err)) = (json, &result) {
        let error = serde_json::json!({
            "type": "error",
            "message": format!("{err:#}"),
        });
        println!("{error}");
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    let ctx = CommandContext::load(&cli)?;

    match cli.command {
        Commands::Pack {
            source,
            revision,
            output,
            workdir,
            keep_workdir,
            backend,
        } => commands::pack::cmd_pack(
            &ctx,
            source,
            revision,
            output,
            workdir,
            keep_workdir,
            backend,
        ),
        Commands::Fetch {
            source,
            revision,
            workdir,
        } => commands::fetch::cmd_fetch(&ctx, source, revision, workdir),
        Commands::Version {
            source,
            revision,
            workdir,
        } => commands::version::cmd_version(&ctx, source, revision, workdir),
        Commands::Clean { workdir } => commands::clean::cmd_clean(&ctx, &workdir),
    }
}

/// Log to stderr; `RUST_LOG` overrides the `-v` level
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "packer=warn",
        1 => "packer=info",
        2 => "packer=debug",
        _ => "packer=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
