//! Variable-length unsigned integers as used by UPS.
//!
//! Numbers are stored little-endian, seven bits per byte. The final byte has
//! its high bit set. Every non-final byte also adds one to the remaining
//! value, so each integer has exactly one encoding.

/// Longest encoding of a `u64`.
pub const MAX_ENCODED_LEN: usize = 10;

/// Decode a number from the start of `input`.
///
/// Returns `(consumed bytes, value)`, or `None` if the input ends before a
/// terminating byte or the value does not fit in a `u64`.
pub fn decode(input: &[u8]) -> Option<(usize, u64)> {
    let mut acc: u128 = 0;
    for (idx, &byte) in input.iter().take(MAX_ENCODED_LEN).enumerate() {
        let shift = 7 * idx as u32;
        acc += u128::from(byte & 0x7f) << shift;
        if byte & 0x80 != 0 {
            return u64::try_from(acc).ok().map(|value| (idx + 1, value));
        }
        acc += 1u128 << (shift + 7);
    }
    None
}

/// Append the encoding of `value` to `out`.
pub fn encode(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let low = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(0x80 | low);
            return;
        }
        out.push(low);
        value -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        encode(value, &mut out);
        out
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encoded(0), [0x80]);
        assert_eq!(encoded(127), [0xff]);
        assert_eq!(encoded(128), [0x00, 0x80]);
        assert_eq!(encoded(255), [0x7f, 0x80]);
        assert_eq!(encoded(16_511), [0x7f, 0xff]);
        assert_eq!(encoded(16_512), [0x00, 0x00, 0x80]);
    }

    #[test]
    fn decode_reports_consumed_bytes() {
        assert_eq!(decode(&[0x00, 0x80, 0xaa]), Some((2, 128)));
        assert_eq!(decode(&[0x85]), Some((1, 5)));
    }

    #[test]
    fn decode_unterminated_is_none() {
        assert_eq!(decode(&[]), None);
        assert_eq!(decode(&[0x00, 0x7f]), None);
    }

    #[test]
    fn u64_max_fits_in_max_len() {
        let bytes = encoded(u64::MAX);
        assert!(bytes.len() <= MAX_ENCODED_LEN);
        assert_eq!(decode(&bytes), Some((bytes.len(), u64::MAX)));
    }

    #[test]
    fn overflow_is_rejected() {
        // Ten bytes whose value exceeds u64::MAX.
        let mut bytes = vec![0x7f; MAX_ENCODED_LEN - 1];
        bytes.push(0xff);
        assert_eq!(decode(&bytes), None);

        // Too many continuation bytes.
        let long = vec![0x00; MAX_ENCODED_LEN + 1];
        assert_eq!(decode(&long), None);
    }
}
