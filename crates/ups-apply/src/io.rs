//! File helpers with error context.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Read a whole file, naming its role and path on failure.
pub fn read_input(role: &str, path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {role} '{}'", path.display()))
}

/// Atomically write `contents` to `path`.
///
/// The data is first written to a sibling temporary file and then renamed,
/// so readers never observe a partially written output.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = temp_sibling(path);

    if let Err(err) = std::fs::write(&temp_path, contents) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(err).with_context(|| format!("Failed to write '{}'", temp_path.display()));
    }

    if let Err(err) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(err).with_context(|| format!("Failed to move output to '{}'", path.display()));
    }

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
