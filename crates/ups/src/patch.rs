//! Zero-copy view over an encoded UPS patch.
//!
//! ```text
//! "UPS1" | vuint source_size | vuint target_size | hunk* | footer
//! hunk   = vuint skip | xor bytes (non-zero) | 0x00
//! footer = source_crc u32le | target_crc u32le | patch_crc u32le
//! ```

use serde::Serialize;

use crate::checksum;
use crate::error::{CrcKind, Error};
use crate::vuint;

/// Magic bytes at the start of every UPS patch.
pub const MAGIC: [u8; 4] = *b"UPS1";

/// Length of the CRC footer.
pub const FOOTER_LEN: usize = 12;

/// A parsed patch borrowing its hunk data from the raw bytes.
#[derive(Debug, Clone)]
pub struct Patch<'a> {
    /// Size of the file the patch applies to.
    pub source_size: u64,
    /// Size of the patched output.
    pub target_size: u64,
    /// CRC-32 of the source file.
    pub source_crc: u32,
    /// CRC-32 of the patched output.
    pub target_crc: u32,
    /// CRC-32 of the patch, excluding the final four bytes.
    pub patch_crc: u32,
    raw: &'a [u8],
    body: &'a [u8],
}

impl<'a> Patch<'a> {
    /// Parse the header and footer of `raw`.
    ///
    /// Hunks are decoded lazily by [`Patch::hunks`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHeader`] if `raw` does not begin with `UPS1`,
    /// or [`Error::MalformedPatch`] if the size fields or footer are missing.
    pub fn parse(raw: &'a [u8]) -> Result<Self, Error> {
        if raw.get(..MAGIC.len()) != Some(&MAGIC[..]) {
            return Err(Error::MissingHeader);
        }

        // Magic, two single-byte sizes, footer.
        if raw.len() < MAGIC.len() + 2 + FOOTER_LEN {
            return Err(Error::malformed("patch is truncated"));
        }

        let body_end = raw.len() - FOOTER_LEN;
        let mut offset = MAGIC.len();

        let (consumed, source_size) = vuint::decode(&raw[offset..body_end])
            .ok_or(Error::malformed("invalid source size"))?;
        offset += consumed;
        let (consumed, target_size) = vuint::decode(&raw[offset..body_end])
            .ok_or(Error::malformed("invalid target size"))?;
        offset += consumed;

        let footer = &raw[body_end..];
        let patch = Self {
            source_size,
            target_size,
            source_crc: read_u32_le(footer, 0),
            target_crc: read_u32_le(footer, 4),
            patch_crc: read_u32_le(footer, 8),
            raw,
            body: &raw[offset..body_end],
        };

        tracing::debug!(
            source_size,
            target_size,
            hunk_bytes = patch.body.len(),
            "parsed UPS header"
        );

        Ok(patch)
    }

    /// Iterate over the hunks in file order.
    pub fn hunks(&self) -> Hunks<'a> {
        Hunks {
            body: self.body,
            pos: 0,
            cursor: 0,
            done: false,
        }
    }

    /// Check the stored patch checksum.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CrcMismatch`] with [`CrcKind::Patch`] on mismatch.
    pub fn verify_patch_crc(&self) -> Result<(), Error> {
        checksum::verify(
            CrcKind::Patch,
            &self.raw[..self.raw.len() - 4],
            self.patch_crc,
        )
    }

    /// Summarize the patch, walking every hunk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPatch`] if any hunk is malformed.
    pub fn info(&self) -> Result<PatchInfo, Error> {
        let mut hunks = 0;
        let mut changed_bytes = 0;
        for hunk in self.hunks() {
            let hunk = hunk?;
            hunks += 1;
            changed_bytes += hunk.xor.len() as u64;
        }

        Ok(PatchInfo {
            source_size: self.source_size,
            target_size: self.target_size,
            source_crc: self.source_crc,
            target_crc: self.target_crc,
            patch_crc: self.patch_crc,
            patch_size: self.raw.len() as u64,
            hunks,
            changed_bytes,
        })
    }
}

fn read_u32_le(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(word)
}

/// One run of changed bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk<'a> {
    /// Absolute offset of the first changed byte in the output.
    pub offset: u64,
    /// XOR mask to apply, without the trailing zero terminator.
    pub xor: &'a [u8],
}

/// Iterator over the hunks of a [`Patch`].
///
/// Yields an error at most once, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct Hunks<'a> {
    body: &'a [u8],
    pos: usize,
    cursor: u64,
    done: bool,
}

impl<'a> Hunks<'a> {
    fn fail(&mut self, reason: &'static str) -> Option<Result<Hunk<'a>, Error>> {
        self.done = true;
        Some(Err(Error::malformed(reason)))
    }
}

impl<'a> Iterator for Hunks<'a> {
    type Item = Result<Hunk<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.body.len() {
            return None;
        }

        let Some((consumed, skip)) = vuint::decode(&self.body[self.pos..]) else {
            return self.fail("invalid hunk offset");
        };
        self.pos += consumed;

        let Some(offset) = self.cursor.checked_add(skip) else {
            return self.fail("hunk offset overflows");
        };

        let rest = &self.body[self.pos..];
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return self.fail("unterminated hunk");
        };
        let xor = &rest[..len];
        self.pos += len + 1;

        // The terminator stands for one unchanged byte.
        let Some(cursor) = offset.checked_add(len as u64 + 1) else {
            return self.fail("hunk offset overflows");
        };
        self.cursor = cursor;

        Some(Ok(Hunk { offset, xor }))
    }
}

/// Summary of a patch, as shown by `ups-apply inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchInfo {
    /// Expected size of the source file.
    pub source_size: u64,
    /// Size of the patched output.
    pub target_size: u64,
    /// CRC-32 of the source file.
    pub source_crc: u32,
    /// CRC-32 of the patched output.
    pub target_crc: u32,
    /// CRC-32 stored for the patch itself.
    pub patch_crc: u32,
    /// Size of the patch file.
    pub patch_size: u64,
    /// Number of hunks.
    pub hunks: usize,
    /// Total number of XOR bytes across all hunks.
    pub changed_bytes: u64,
}
