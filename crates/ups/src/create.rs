//! Building a patch from two buffers.

use crate::checksum;
use crate::patch::MAGIC;
use crate::vuint;

/// Encode the difference between `source` and `target` as a UPS patch.
///
/// Positions past the end of the shorter buffer compare against zero, so the
/// patch can both grow and shrink the file.
pub fn create_patch(source: &[u8], target: &[u8]) -> Vec<u8> {
    let at = |buf: &[u8], i: usize| buf.get(i).copied().unwrap_or(0);
    let len = source.len().max(target.len());

    let mut out = MAGIC.to_vec();
    vuint::encode(source.len() as u64, &mut out);
    vuint::encode(target.len() as u64, &mut out);

    let mut cursor = 0;
    let mut pos = 0;
    let mut hunks = 0usize;
    while pos < len {
        if at(source, pos) == at(target, pos) {
            pos += 1;
            continue;
        }

        vuint::encode((pos - cursor) as u64, &mut out);
        while pos < len {
            let mask = at(source, pos) ^ at(target, pos);
            if mask == 0 {
                break;
            }
            out.push(mask);
            pos += 1;
        }
        out.push(0);
        // The terminator covers the first equal byte.
        pos += 1;
        cursor = pos;
        hunks += 1;
    }

    out.extend_from_slice(&checksum::crc32(source).to_le_bytes());
    out.extend_from_slice(&checksum::crc32(target).to_le_bytes());
    let patch_crc = checksum::crc32(&out);
    out.extend_from_slice(&patch_crc.to_le_bytes());

    tracing::debug!(
        source_len = source.len(),
        target_len = target.len(),
        hunks,
        patch_len = out.len(),
        "patch created"
    );
    out
}
