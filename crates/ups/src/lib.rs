//! Reading, applying and creating UPS binary patches.
//!
//! A UPS patch stores the XOR difference between a source and a target file
//! as a sequence of hunks, followed by CRC-32 checksums of the source, the
//! target, and the patch itself.
//!
//! # Example
//!
//! ```
//! let source = b"hello world".to_vec();
//! let patch = ups::create_patch(&source, b"hello there");
//!
//! let target = ups::apply_patch(source, &patch)?;
//! assert_eq!(target, b"hello there");
//! # Ok::<(), ups::Error>(())
//! ```

pub mod apply;
pub mod checksum;
pub mod create;
pub mod error;
pub mod patch;
pub mod vuint;

// Re-exports
pub use apply::{Options, apply_patch, apply_patch_with};
pub use create::create_patch;
pub use error::{CrcKind, Error};
pub use patch::{FOOTER_LEN, Hunk, Hunks, MAGIC, Patch, PatchInfo};
