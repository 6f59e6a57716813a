//! Errors raised while reading or applying a UPS patch.

use thiserror::Error;

/// Which of the three checksums stored in a patch footer failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrcKind {
    /// CRC-32 of the file the patch is applied to.
    Source,
    /// CRC-32 of the patch itself, excluding its last four bytes.
    Patch,
    /// CRC-32 of the patched output.
    Target,
}

impl CrcKind {
    /// Lowercase name used in error messages and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Patch => "patch",
            Self::Target => "target",
        }
    }
}

impl std::fmt::Display for CrcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by [`crate::Patch::parse`] and [`crate::apply_patch_with`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The patch does not start with the `UPS1` magic.
    #[error("Missing 'UPS1' header at start of patch")]
    MissingHeader,

    /// The patch structure is invalid.
    #[error("Input patch malformed: {reason}")]
    MalformedPatch {
        /// Short description of what was wrong.
        reason: &'static str,
    },

    /// The source file length differs from the one recorded in the patch.
    #[error("Source size mismatch: patch expects {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Size recorded in the patch header.
        expected: u64,
        /// Size of the supplied source.
        actual: u64,
    },

    /// A stored checksum did not match the computed one.
    #[error("CRC mismatch ({kind}): expected {expected:08x}, got {actual:08x}")]
    CrcMismatch {
        /// Which checksum failed.
        kind: CrcKind,
        /// Value stored in the patch footer.
        expected: u32,
        /// Value computed from the data.
        actual: u32,
    },

    /// A size or offset in the patch does not fit in memory on this platform.
    #[error("Patch refers to {0} bytes, which exceeds the addressable size")]
    TooLarge(u64),
}

impl Error {
    pub(crate) fn malformed(reason: &'static str) -> Self {
        Self::MalformedPatch { reason }
    }
}
