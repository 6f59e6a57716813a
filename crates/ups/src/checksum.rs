//! CRC-32 helpers for the patch footer.

use crate::error::{CrcKind, Error};

const CRC32: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// CRC-32 (ISO-HDLC, the zlib polynomial) of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// Check `data` against a stored checksum.
///
/// # Errors
///
/// Returns [`Error::CrcMismatch`] tagged with `kind` when the values differ.
pub fn verify(kind: CrcKind, data: &[u8], expected: u32) -> Result<(), Error> {
    let actual = crc32(data);
    if actual == expected {
        Ok(())
    } else {
        tracing::debug!(%kind, expected, actual, "checksum mismatch");
        Err(Error::CrcMismatch {
            kind,
            expected,
            actual,
        })
    }
}
