//! ups-apply - apply and create UPS patches
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! The default invocation mirrors the classic patcher interface:
//!
//! ```text
//! ups-apply <SOURCE> <PATCH> <OUTPUT> [--skip-crc]
//! ```
//!
//! `create` and `inspect` subcommands cover producing and examining patches.

pub mod cmd;
pub mod io;
pub mod ui;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Version string derived from git tags by the build script.
pub const VERSION: &str = env!("UPS_APPLY_VERSION");

#[derive(Debug, Parser)]
#[command(name = "ups-apply")]
#[command(author, version = VERSION, about = "Apply and create UPS binary patches")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub apply: ApplyArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the default apply form.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// File to patch
    #[arg(required = true)]
    pub source: Option<PathBuf>,
    /// UPS patch file
    #[arg(required = true)]
    pub patch: Option<PathBuf>,
    /// Where to write the patched file
    #[arg(required = true)]
    pub output: Option<PathBuf>,
    /// Skip the source size and CRC checks
    #[arg(long, env = "UPS_SKIP_CRC")]
    pub skip_crc: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a patch that turns SOURCE into TARGET
    Create {
        /// Original file
        source: PathBuf,
        /// Modified file
        target: PathBuf,
        /// Where to write the patch
        output: PathBuf,
    },
    /// Show the header, checksums and hunk statistics of a patch
    Inspect {
        /// UPS patch file
        patch: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
