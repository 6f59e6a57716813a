//! Inspect command

use anyhow::{Context, Result};
use std::path::Path;

use crate::{io, ui};

/// Print a summary of a patch, as text or JSON.
pub fn inspect(patch: &Path, json: bool) -> Result<()> {
    let raw = io::read_input("patch", patch)?;
    let info = ups::Patch::parse(&raw)
        .and_then(|parsed| parsed.info())
        .with_context(|| format!("Failed to read '{}'", patch.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!();
    let sized = |bytes, crc: u32| format!("{} ({crc:08x})", ui::format_size(bytes));

    ui::field("source", sized(info.source_size, info.source_crc));
    ui::field("target", sized(info.target_size, info.target_crc));
    ui::field("patch", sized(info.patch_size, info.patch_crc));
    ui::field("hunks", info.hunks);
    ui::field("changed", format!("{} bytes", info.changed_bytes));
    println!();

    Ok(())
}
