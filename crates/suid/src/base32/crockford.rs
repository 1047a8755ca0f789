use crate::Base32Error;

/// The 32 symbols of the text form, in ascending ASCII order.
///
/// This is the Crockford alphabet (no `I`, `L`, `O`, `U`). Because the symbols
/// ascend and encoding is MSB-first, comparing two encoded strings byte by
/// byte gives the same answer as comparing the values they encode.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Inverse of [`ALPHABET`]. Case-sensitive: only the exact symbols decode.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Returns the symbol for a 5-bit value. Bits above the low five are ignored.
#[inline]
#[must_use]
pub const fn encode_symbol(value: u8) -> u8 {
    ALPHABET[(value & 0x1F) as usize]
}

/// Returns the 5-bit value of `byte`, or `None` if it is not in the alphabet.
#[inline]
#[must_use]
pub const fn decode_symbol(byte: u8) -> Option<u8> {
    match LOOKUP[byte as usize] {
        NO_VALUE => None,
        value => Some(value),
    }
}

/// Number of characters needed to encode `bytes` bytes.
pub(crate) const fn base32_size(bytes: usize) -> usize {
    (bytes * 8).div_ceil(BITS_PER_CHAR)
}

/// Encodes big-endian `input` into `buf`, MSB first.
///
/// `buf.len()` must be `base32_size(input.len())`; the excess bits of the
/// first character are zero padding.
pub(crate) fn encode_base32(input: &[u8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len(), base32_size(input.len()));
    let mut bits = buf.len() * BITS_PER_CHAR - input.len() * 8;
    let mut acc = 0_u16;

    let mut out = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            buf[out] = encode_symbol(((acc >> bits) & 0x1F) as u8);
            out += 1;
        }
        acc &= (1 << bits) - 1;
    }
}

/// Decodes `encoded` into the big-endian `out`.
///
/// The whole input is validated before any output is written: the length
/// must be exactly `base32_size(out.len())` and every byte must be in the
/// alphabet. The leading padding bits must be zero.
pub(crate) fn decode_base32(encoded: &[u8], out: &mut [u8]) -> Result<(), Base32Error> {
    let expected = base32_size(out.len());
    if encoded.len() != expected {
        return Err(Base32Error::DecodeInvalidLen {
            len: encoded.len(),
            expected,
        });
    }
    if let Some((index, &byte)) = encoded
        .iter()
        .enumerate()
        .find(|&(_, &b)| decode_symbol(b).is_none())
    {
        return Err(Base32Error::DecodeInvalidAscii { byte, index });
    }

    let mut pad = expected * BITS_PER_CHAR - out.len() * 8;
    let mut acc = 0_u16;
    let mut bits = 0_usize;
    let mut o = 0;
    let mut decoded = [0_u8; 16];
    let scratch = &mut decoded[..out.len()];

    for &b in encoded {
        let value = LOOKUP[b as usize];
        acc = (acc << BITS_PER_CHAR) | u16::from(value);
        bits += BITS_PER_CHAR;
        if pad > 0 {
            let drop = pad.min(bits);
            if acc >> (bits - drop) != 0 {
                return Err(Base32Error::DecodeOverflow);
            }
            bits -= drop;
            pad -= drop;
        }
        while bits >= 8 {
            bits -= 8;
            scratch[o] = (acc >> bits) as u8;
            o += 1;
        }
        acc &= (1 << bits) - 1;
    }
    out.copy_from_slice(scratch);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip_u64(val: u64) {
        let mut buf = [0u8; 13];
        encode_base32(&val.to_be_bytes(), &mut buf);
        let mut out = [0u8; 8];
        decode_base32(&buf, &mut out).unwrap();
        assert_eq!(val, u64::from_be_bytes(out), "roundtrip for u64: input={val}");
    }

    #[test]
    fn alphabet_is_ascending_and_distinct() {
        for pair in ALPHABET.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0] as char, pair[1] as char);
        }
    }

    #[test]
    fn every_symbol_maps_to_its_index() {
        for (i, &symbol) in ALPHABET.iter().enumerate() {
            assert_eq!(decode_symbol(symbol), Some(i as u8));
            assert_eq!(encode_symbol(i as u8), symbol);
        }
    }

    #[test]
    fn bytes_outside_the_alphabet_do_not_decode() {
        let valid = (0..=u8::MAX)
            .filter(|&b| decode_symbol(b).is_some())
            .count();
        assert_eq!(valid, 32);
        for b in [b'a', b'z', b'I', b'L', b'O', b'U', b'!', b' ', 0, 0xFF] {
            assert_eq!(decode_symbol(b), None, "byte {b:#x} should not decode");
        }
    }

    #[test]
    fn encode_decode_preserves_u64_values() {
        for &v in &[
            0,
            1,
            u64::MAX,
            42,
            0xFF00_FF00_FF00_FF00,
            0x1234_5678_90AB_CDEF,
        ] {
            roundtrip_u64(v);
        }
    }

    #[test]
    fn encode_known_values() {
        let mut buf = [0u8; 13];
        encode_base32(&u64::MAX.to_be_bytes(), &mut buf);
        assert_eq!(&buf, b"FZZZZZZZZZZZZ");

        encode_base32(&42u64.to_be_bytes(), &mut buf);
        assert_eq!(&buf, b"000000000001A");

        let mut buf = [0u8; 16];
        encode_base32(&[0xFF; 10], &mut buf);
        assert_eq!(&buf, b"ZZZZZZZZZZZZZZZZ");
    }

    #[test]
    fn decode_rejects_set_padding_bits() {
        let mut out = [0u8; 8];
        // 'G' = 0b10000: the padding bit is set.
        assert_eq!(
            decode_base32(b"G000000000000", &mut out),
            Err(Base32Error::DecodeOverflow)
        );
        assert!(decode_base32(b"F000000000000", &mut out).is_ok());
    }

    #[test]
    fn decode_reports_first_invalid_character() {
        let mut out = [0u8; 8];
        assert_eq!(
            decode_base32(b"00000a000000!", &mut out),
            Err(Base32Error::DecodeInvalidAscii {
                byte: b'a',
                index: 5
            })
        );
    }

    #[test]
    fn decode_leaves_output_untouched_on_error() {
        let mut out = [0xAA_u8; 8];
        assert!(decode_base32(b"ZZZZZZZZZZZZ!", &mut out).is_err());
        assert_eq!(out, [0xAA; 8]);
        assert!(decode_base32(b"G000000000000", &mut out).is_err());
        assert_eq!(out, [0xAA; 8]);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let mut out = [0u8; 10];
        for len in [0, 15, 17] {
            let input = vec![b'0'; len];
            assert_eq!(
                decode_base32(&input, &mut out),
                Err(Base32Error::DecodeInvalidLen { len, expected: 16 })
            );
        }
    }
}
