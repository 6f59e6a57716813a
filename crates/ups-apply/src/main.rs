//! ups-apply - UPS patch CLI

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ups_apply::cmd;
use ups_apply::{ApplyArgs, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose picks the default level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Create {
            source,
            target,
            output,
        }) => cmd::create::create(&source, &target, &output, cli.quiet),
        Some(Commands::Inspect { patch, json }) => cmd::inspect::inspect(&patch, json),
        None => {
            let ApplyArgs {
                source,
                patch,
                output,
                skip_crc,
            } = cli.apply;
            let source = source.context("missing SOURCE argument")?;
            let patch = patch.context("missing PATCH argument")?;
            let output = output.context("missing OUTPUT argument")?;
            cmd::apply::apply(&source, &patch, &output, skip_crc, cli.quiet)
        }
    }
}
