//! Apply command

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use crate::{io, ui};

/// Apply `patch` to `source` and write the result to `output`.
///
/// Nothing is written when the patch fails to apply.
pub fn apply(
    source: &Path,
    patch: &Path,
    output: &Path,
    skip_crc: bool,
    quiet: bool,
) -> Result<()> {
    let source_bytes = io::read_input("source", source)?;
    let patch_bytes = io::read_input("patch", patch)?;

    tracing::info!(
        source = %source.display(),
        patch = %patch.display(),
        skip_crc,
        "applying patch"
    );

    let start = Instant::now();
    let contents = ups::apply_patch_with(ups::Options { skip_crc }, source_bytes, &patch_bytes)
        .with_context(|| format!("Failed to apply '{}'", patch.display()))?;
    let elapsed = start.elapsed();

    io::write_atomic(output, &contents)?;

    if !quiet {
        ui::success(
            &format!("Patched {}", output.display()),
            &format!(
                "({}, {})",
                ui::format_size(contents.len() as u64),
                ui::took(elapsed)
            ),
        );
    }

    Ok(())
}
