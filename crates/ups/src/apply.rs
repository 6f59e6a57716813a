//! Applying a patch to a source buffer.

use crate::checksum;
use crate::error::{CrcKind, Error};
use crate::patch::Patch;

/// Knobs for [`apply_patch_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Skip the source size check and all three CRC checks.
    pub skip_crc: bool,
}

/// Apply `patch` to `source` with every check enabled.
///
/// # Errors
///
/// See [`apply_patch_with`].
pub fn apply_patch(source: Vec<u8>, patch: &[u8]) -> Result<Vec<u8>, Error> {
    apply_patch_with(Options::default(), source, patch)
}

/// Apply `patch` to `source`, reusing the source allocation for the output.
///
/// # Errors
///
/// - [`Error::MissingHeader`] / [`Error::MalformedPatch`] for invalid patches,
///   including hunks that write past the end of the output.
/// - [`Error::SizeMismatch`] and [`Error::CrcMismatch`] when verification is
///   enabled and the inputs do not match the patch.
/// - [`Error::TooLarge`] when the output size is not addressable.
pub fn apply_patch_with(
    options: Options,
    mut source: Vec<u8>,
    patch: &[u8],
) -> Result<Vec<u8>, Error> {
    let parsed = Patch::parse(patch)?;

    if options.skip_crc {
        tracing::debug!("skipping size and checksum verification");
    } else {
        let actual = source.len() as u64;
        if actual != parsed.source_size {
            return Err(Error::SizeMismatch {
                expected: parsed.source_size,
                actual,
            });
        }
        checksum::verify(CrcKind::Source, &source, parsed.source_crc)?;
        parsed.verify_patch_crc()?;
    }

    let target_len =
        usize::try_from(parsed.target_size).map_err(|_| Error::TooLarge(parsed.target_size))?;
    source
        .try_reserve(target_len.saturating_sub(source.len()))
        .map_err(|_| Error::TooLarge(parsed.target_size))?;
    source.resize(source.len().max(target_len), 0);

    let mut hunks = 0usize;
    for hunk in parsed.hunks() {
        let hunk = hunk?;
        let start = usize::try_from(hunk.offset).map_err(|_| Error::TooLarge(hunk.offset))?;
        let window = start
            .checked_add(hunk.xor.len())
            .and_then(|end| source.get_mut(start..end))
            .ok_or(Error::malformed("hunk writes past end of output"))?;

        for (byte, mask) in window.iter_mut().zip(hunk.xor) {
            *byte ^= mask;
        }
        hunks += 1;
    }

    source.truncate(target_len);

    if !options.skip_crc {
        checksum::verify(CrcKind::Target, &source, parsed.target_crc)?;
    }

    tracing::debug!(hunks, output_len = source.len(), "patch applied");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::MAGIC;
    use crate::vuint;

    /// Hand-assembles a patch with correct checksums for `source -> target`.
    fn build(source: &[u8], target: &[u8], body: &[u8]) -> Vec<u8> {
        let mut out = MAGIC.to_vec();
        vuint::encode(source.len() as u64, &mut out);
        vuint::encode(target.len() as u64, &mut out);
        out.extend_from_slice(body);
        out.extend_from_slice(&checksum::crc32(source).to_le_bytes());
        out.extend_from_slice(&checksum::crc32(target).to_le_bytes());
        let crc = checksum::crc32(&out);
        out.extend_from_slice(&crc.to_le_bytes());
        out
    }

    #[test]
    fn applies_same_size_patch() {
        let source = b"hello world".to_vec();
        let target = b"hello WORLD".to_vec();
        let xor: Vec<u8> = b"world"
            .iter()
            .zip(b"WORLD")
            .map(|(a, b)| a ^ b)
            .collect();
        let mut body = vec![0x86];
        body.extend_from_slice(&xor);
        body.push(0);

        let patch = build(&source, &target, &body);
        assert_eq!(apply_patch(source, &patch).unwrap(), target);
    }

    #[test]
    fn grows_output_with_zero_fill() {
        let source = b"ab".to_vec();
        let target = b"ab\0\0z".to_vec();
        // skip 4, xor 'z' against the zero fill
        let patch = build(&source, &target, &[0x84, b'z', 0x00]);

        assert_eq!(apply_patch(source, &patch).unwrap(), target);
    }

    #[test]
    fn shrinks_output_to_target_size() {
        let source = b"abcdef".to_vec();
        let target = b"abc".to_vec();
        let patch = build(&source, &target, &[]);

        assert_eq!(apply_patch(source, &patch).unwrap(), target);
    }

    #[test]
    fn terminator_may_sit_at_end_of_output() {
        let source = b"aa".to_vec();
        let target = b"ab".to_vec();
        // xor reaches the last byte; the terminator is one past the end
        let patch = build(&source, &target, &[0x81, b'a' ^ b'b', 0x00]);

        assert_eq!(apply_patch(source, &patch).unwrap(), target);
    }

    #[test]
    fn out_of_bounds_hunk_is_malformed_not_panic() {
        let source = b"aa".to_vec();
        let patch = build(&source, &source, &[0x85, 0x01, 0x00]);

        assert_eq!(
            apply_patch(source, &patch).unwrap_err(),
            Error::malformed("hunk writes past end of output")
        );
    }

    #[test]
    fn unaddressable_target_size_is_too_large() {
        // Valid empty source and a self-consistent patch CRC, so every
        // check passes before the output buffer is sized.
        let mut patch = MAGIC.to_vec();
        vuint::encode(0, &mut patch);
        vuint::encode(u64::MAX, &mut patch);
        patch.extend_from_slice(&checksum::crc32(b"").to_le_bytes());
        patch.extend_from_slice(&0u32.to_le_bytes());
        let crc = checksum::crc32(&patch);
        patch.extend_from_slice(&crc.to_le_bytes());

        assert_eq!(
            apply_patch(Vec::new(), &patch).unwrap_err(),
            Error::TooLarge(u64::MAX)
        );
        assert_eq!(
            apply_patch_with(Options { skip_crc: true }, b"abc".to_vec(), &patch).unwrap_err(),
            Error::TooLarge(u64::MAX)
        );
    }

    #[test]
    fn wrong_source_is_rejected() {
        let patch = build(b"abc", b"abd", &[0x82, b'c' ^ b'd', 0x00]);

        assert_eq!(
            apply_patch(b"abcd".to_vec(), &patch).unwrap_err(),
            Error::SizeMismatch {
                expected: 3,
                actual: 4
            }
        );
        assert!(matches!(
            apply_patch(b"xyz".to_vec(), &patch).unwrap_err(),
            Error::CrcMismatch {
                kind: CrcKind::Source,
                ..
            }
        ));
    }

    #[test]
    fn skip_crc_applies_to_mismatched_source() {
        let patch = build(b"abc", b"abd", &[0x82, b'c' ^ b'd', 0x00]);
        let out = apply_patch_with(Options { skip_crc: true }, b"xyc".to_vec(), &patch).unwrap();
        assert_eq!(out, b"xyd");
    }

    #[test]
    fn target_crc_is_checked() {
        let source = b"abc".to_vec();
        // Claims target "abd" but the hunk produces "abe".
        let patch = build(&source, b"abd", &[0x82, b'c' ^ b'e', 0x00]);

        assert!(matches!(
            apply_patch(source, &patch).unwrap_err(),
            Error::CrcMismatch {
                kind: CrcKind::Target,
                ..
            }
        ));
    }

    #[test]
    fn corrupted_patch_crc_is_checked() {
        let source = b"abc".to_vec();
        let mut patch = build(&source, b"abd", &[0x82, b'c' ^ b'd', 0x00]);
        let last = patch.len() - 1;
        patch[last] ^= 0xff;

        assert!(matches!(
            apply_patch(source, &patch).unwrap_err(),
            Error::CrcMismatch {
                kind: CrcKind::Patch,
                ..
            }
        ));
    }
}
