//! Terminal output helpers.

use crossterm::style::Stylize;
use std::time::Duration;

/// Success icon (✓)
pub const ICON_SUCCESS: &str = "✓";

/// Label column width for key/value listings.
const LABEL_WIDTH: usize = 14;

/// Format bytes for human-readable display
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Print a green success line with a dimmed detail suffix.
pub fn success(message: &str, detail: &str) {
    println!(
        "{} {} {}",
        ICON_SUCCESS.green(),
        message.green(),
        detail.dark_grey()
    );
}

/// Print an aligned `label value` line.
pub fn field(label: &str, value: impl std::fmt::Display) {
    let padded = format!("{label:<LABEL_WIDTH$}");
    println!("  {}{value}", padded.dark_grey());
}

/// Elapsed time in the `took 1.23ms` style.
pub fn took(elapsed: Duration) -> String {
    format!("took {elapsed:.02?}")
}
