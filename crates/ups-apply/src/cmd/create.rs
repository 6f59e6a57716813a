//! Create command

use anyhow::Result;
use std::path::Path;

use crate::{io, ui};

/// Write a patch turning `source` into `target`.
pub fn create(source: &Path, target: &Path, output: &Path, quiet: bool) -> Result<()> {
    let source_bytes = io::read_input("source", source)?;
    let target_bytes = io::read_input("target", target)?;

    let patch = ups::create_patch(&source_bytes, &target_bytes);
    io::write_atomic(output, &patch)?;

    tracing::info!(output = %output.display(), bytes = patch.len(), "patch written");

    if !quiet {
        ui::success(
            &format!("Created {}", output.display()),
            &format!("({})", ui::format_size(patch.len() as u64)),
        );
    }

    Ok(())
}
