/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Encodes `value` into `buf`, returning the number of bytes used.
#[inline]
pub(super) fn encode(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut len = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf[len] = byte;
            return len + 1;
        }
        buf[len] = byte | 0x80;
        len += 1;
    }
}

/// Number of bytes [`encode`] uses for `value`.
#[inline]
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Folds one more byte into a partially decoded varint.
///
/// Returns `Ok(true)` once the terminating byte was seen and `Err(())`
/// when the value no longer fits in 64 bits.
#[inline]
pub(super) fn accumulate(acc: &mut u64, shift: &mut u32, byte: u8) -> Result<bool, ()> {
    let bits = u64::from(byte & 0x7F);
    if *shift == 63 && bits > 1 {
        return Err(());
    }
    *acc |= bits << *shift;
    if byte & 0x80 == 0 {
        return Ok(true);
    }
    *shift += 7;
    if *shift > 63 {
        return Err(());
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<u64, ()> {
        let (mut acc, mut shift) = (0, 0);
        for &byte in bytes {
            if accumulate(&mut acc, &mut shift, byte)? {
                return Ok(acc);
            }
        }
        Err(())
    }

    #[test]
    fn encodes_known_vectors() {
        let mut buf = [0; MAX_VARINT_LEN];
        let cases: &[(u64, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (300, &[0xAC, 0x02]),
            (16_384, &[0x80, 0x80, 0x01]),
        ];
        for (value, expected) in cases {
            let len = encode(*value, &mut buf);
            assert_eq!(&buf[..len], *expected, "encoding {value}");
            assert_eq!(encoded_len(*value), len);
            assert_eq!(decode(expected), Ok(*value));
        }
    }

    #[test]
    fn extremes() {
        let mut buf = [0; MAX_VARINT_LEN];
        let len = encode(u64::MAX, &mut buf);
        assert_eq!(len, MAX_VARINT_LEN);
        assert_eq!(encoded_len(u64::MAX), MAX_VARINT_LEN);
        assert_eq!(decode(&buf[..len]), Ok(u64::MAX));
    }

    #[test]
    fn overflow_is_rejected() {
        // Eleven continuation bytes.
        assert_eq!(decode(&[0xFF; 11]), Err(()));
        // Tenth byte carries more than the single remaining bit.
        let mut bytes = [0xFF; 10];
        bytes[9] = 0x02;
        assert_eq!(decode(&bytes), Err(()));
    }
}
